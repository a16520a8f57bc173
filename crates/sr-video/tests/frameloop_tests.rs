use sr_base::{Rect, Tensor, Vec2};
use sr_image::Frame;
use sr_infer::{InferError, Upscaler};
use sr_video::{
    FrameLoop, FrameSink, ImmediateScheduler, MemorySink, MemorySource, Pipeline, PipelineConfig,
    RenderMode, Scheduler, VideoError,
};
use std::cell::Cell;
use std::rc::Rc;

/// Nearest-neighbour upscaler used in place of a real model.
struct NearestUpscaler {
    factor: usize,
}

impl NearestUpscaler {
    fn new(factor: usize) -> Self {
        Self { factor }
    }
}

impl Upscaler for NearestUpscaler {
    fn name(&self) -> &str {
        "nearest"
    }

    fn infer(&mut self, input: &Tensor<f32>) -> Result<Tensor<f32>, InferError> {
        let (_, _, h, w) = input.dims4()?;
        let r = self.factor;
        let mut data = Vec::with_capacity(h * w * r * r);
        for y in 0..h * r {
            for x in 0..w * r {
                data.push(input.data[(y / r) * w + x / r]);
            }
        }
        Ok(Tensor::new(vec![1, 1, h * r, w * r], data)?)
    }
}

struct FailingUpscaler;

impl Upscaler for FailingUpscaler {
    fn name(&self) -> &str {
        "failing"
    }

    fn infer(&mut self, _input: &Tensor<f32>) -> Result<Tensor<f32>, InferError> {
        Err(InferError::Runtime("model exploded".to_string()))
    }
}

/// Returns a fixed tensor regardless of input.
struct FixedUpscaler(Tensor<f32>);

impl Upscaler for FixedUpscaler {
    fn name(&self) -> &str {
        "fixed"
    }

    fn infer(&mut self, _input: &Tensor<f32>) -> Result<Tensor<f32>, InferError> {
        Ok(self.0.clone())
    }
}

/// Counts ticks through a shared handle the test keeps.
#[derive(Clone, Default)]
struct CountingScheduler {
    ticks: Rc<Cell<usize>>,
}

impl Scheduler for CountingScheduler {
    async fn tick(&mut self) {
        self.ticks.set(self.ticks.get() + 1);
    }
}

/// Accepts `open_for` frames, then reports the output as closed.
struct ClosingSink {
    open_for: usize,
    received: usize,
}

impl FrameSink for ClosingSink {
    async fn send(&mut self, _frame: Frame) -> Result<(), VideoError> {
        if self.received == self.open_for {
            return Err(VideoError::Closed);
        }
        self.received += 1;
        Ok(())
    }
}

fn gray(level: u8) -> Frame {
    Frame::filled(4, 4, [level, level, level, 255])
}

fn new_loop<U: Upscaler>(
    source: MemorySource,
    config: PipelineConfig,
) -> FrameLoop<MemorySource, MemorySink, ImmediateScheduler, U> {
    FrameLoop::new(
        source,
        MemorySink::new(),
        ImmediateScheduler,
        Pipeline::new(config),
    )
}

#[tokio::test]
async fn test_frame_limit_one_processes_exactly_one_frame() {
    let source = MemorySource::new(vec![gray(255)]).with_looping(true);
    let config = PipelineConfig::default().with_frame_limit(Some(1));
    let mut frame_loop = new_loop(source, config);
    frame_loop.load(NearestUpscaler::new(2));

    let count = frame_loop.run().await.unwrap();

    assert_eq!(count, 1);
    assert_eq!(frame_loop.frame_count(), 1);
    let frames = frame_loop.sink().frames();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].width(), 8);
    assert_eq!(frames[0].height(), 8);
    // white extracts to 235.045 / 255
    assert_eq!(frames[0].pixel(7, 7), [235, 235, 235, 255]);
}

#[tokio::test]
async fn test_idle_loop_refuses_to_run() {
    let source = MemorySource::new(vec![gray(0)]);
    let mut frame_loop = new_loop::<NearestUpscaler>(source, PipelineConfig::default());

    assert!(!frame_loop.is_running());
    assert!(matches!(frame_loop.run().await, Err(VideoError::NotLoaded)));
    assert!(matches!(frame_loop.step().await, Err(VideoError::NotLoaded)));
    assert!(frame_loop.sink().frames().is_empty());
}

#[tokio::test]
async fn test_load_moves_to_running() {
    let source = MemorySource::new(vec![gray(0)]);
    let mut frame_loop = new_loop(source, PipelineConfig::default());
    frame_loop.load(NearestUpscaler::new(1));
    assert!(frame_loop.is_running());
}

#[tokio::test]
async fn test_looping_source_wraps() {
    let source = MemorySource::new(vec![gray(0), gray(255)]).with_looping(true);
    let config = PipelineConfig::default().with_frame_limit(Some(5));
    let mut frame_loop = new_loop(source, config);
    frame_loop.load(NearestUpscaler::new(1));

    assert_eq!(frame_loop.run().await.unwrap(), 5);

    let levels: Vec<u8> = frame_loop
        .sink()
        .frames()
        .iter()
        .map(|f| f.pixel(0, 0)[0])
        .collect();
    // black extracts to 16 / 255, white to 235.045 / 255
    assert_eq!(levels, vec![16, 235, 16, 235, 16]);
}

#[tokio::test]
async fn test_non_looping_source_ends_loop() {
    let source = MemorySource::new(vec![gray(10), gray(20), gray(30)]);
    let mut frame_loop = new_loop(source, PipelineConfig::default());
    frame_loop.load(NearestUpscaler::new(1));

    assert_eq!(frame_loop.run().await.unwrap(), 3);
    assert_eq!(frame_loop.sink().frames().len(), 3);
    assert!(!frame_loop.step().await.unwrap());
}

#[tokio::test]
async fn test_inference_error_stops_loop() {
    let source = MemorySource::new(vec![gray(10)]).with_looping(true);
    let mut frame_loop = new_loop(source, PipelineConfig::default());
    frame_loop.load(FailingUpscaler);

    let result = frame_loop.run().await;

    assert!(matches!(result, Err(VideoError::Infer(InferError::Runtime(_)))));
    assert_eq!(frame_loop.frame_count(), 0);
    assert!(frame_loop.sink().frames().is_empty());
}

#[tokio::test]
async fn test_bad_output_shape_stops_loop() {
    let output = Tensor::new(vec![1, 3, 2, 2], vec![0.5f32; 12]).unwrap();
    let source = MemorySource::new(vec![gray(10)]);
    let mut frame_loop = new_loop(source, PipelineConfig::default());
    frame_loop.load(FixedUpscaler(output));

    assert!(matches!(frame_loop.run().await, Err(VideoError::Shape(_))));
}

#[tokio::test]
async fn test_step_runs_one_cycle() {
    let source = MemorySource::new(vec![gray(0), gray(0)]);
    let mut frame_loop = new_loop(source, PipelineConfig::default());
    frame_loop.load(NearestUpscaler::new(3));

    assert!(frame_loop.step().await.unwrap());
    assert_eq!(frame_loop.frame_count(), 1);
    assert_eq!(frame_loop.sink().frames()[0].width(), 12);
}

#[tokio::test]
async fn test_crop_is_clamped_into_frame() {
    // R = x * 20, so each column has its own luminance
    let mut data = Vec::new();
    for _y in 0..10 {
        for x in 0..10u8 {
            data.extend_from_slice(&[x * 20, 0, 0, 255]);
        }
    }
    let frame = Frame::new(10, 10, data).unwrap();
    let crop = Rect::new(Vec2::new(8, 8), Vec2::new(4, 4));
    let config = PipelineConfig::default()
        .with_crop(Some(crop))
        .with_frame_limit(Some(1));
    let mut frame_loop = new_loop(MemorySource::new(vec![frame]), config);
    frame_loop.load(NearestUpscaler::new(1));

    frame_loop.run().await.unwrap();

    let out = &frame_loop.sink().frames()[0];
    assert_eq!((out.width(), out.height()), (4, 4));
    // clamped origin is (5, 5): R = 100 gives Y = 41.7, R = 120 gives 46.84
    assert_eq!(out.pixel(0, 0), [42, 42, 42, 255]);
    assert_eq!(out.pixel(1, 0), [47, 47, 47, 255]);
}

#[tokio::test]
async fn test_crop_larger_than_frame_fails() {
    let crop = Rect::new(Vec2::new(0, 0), Vec2::new(8, 8));
    let config = PipelineConfig::default().with_crop(Some(crop));
    let mut frame_loop = new_loop(MemorySource::new(vec![gray(0)]), config);
    frame_loop.load(NearestUpscaler::new(1));

    assert!(matches!(frame_loop.run().await, Err(VideoError::Shape(_))));
}

#[tokio::test]
async fn test_mix_render_keeps_gray() {
    let config = PipelineConfig::default()
        .with_render_mode(RenderMode::Mix)
        .with_frame_limit(Some(1));
    let mut frame_loop = new_loop(MemorySource::new(vec![gray(100)]), config);
    frame_loop.load(NearestUpscaler::new(2));

    frame_loop.run().await.unwrap();

    let out = &frame_loop.sink().frames()[0];
    assert_eq!((out.width(), out.height()), (8, 8));
    // Y = 0.859 * 100 + 16 = 101.9 on a gray chroma surface
    assert_eq!(out.pixel(3, 5), [102, 102, 102, 255]);
}

#[tokio::test]
async fn test_preview_sink_receives_scaled_input() {
    let config = PipelineConfig::default()
        .with_zoom_factor(3)
        .with_preview(true)
        .with_frame_limit(Some(2));
    let source = MemorySource::new(vec![gray(50)]).with_looping(true);
    let mut frame_loop = new_loop(source, config).with_preview_sink(MemorySink::new());
    frame_loop.load(NearestUpscaler::new(2));

    frame_loop.run().await.unwrap();

    let previews = frame_loop.preview_sink().unwrap().frames();
    assert_eq!(previews.len(), 2);
    assert_eq!((previews[0].width(), previews[0].height()), (12, 12));
    assert_eq!(previews[0].pixel(6, 6), [50, 50, 50, 255]);
    assert_eq!(frame_loop.sink().frames()[0].width(), 8);
}

#[tokio::test]
async fn test_frame_limit_one_ticks_once() {
    let scheduler = CountingScheduler::default();
    let ticks = Rc::clone(&scheduler.ticks);
    let source = MemorySource::new(vec![gray(128)]).with_looping(true);
    let config = PipelineConfig::default().with_frame_limit(Some(1));
    let mut frame_loop = FrameLoop::new(source, MemorySink::new(), scheduler, Pipeline::new(config));
    frame_loop.load(NearestUpscaler::new(1));

    assert_eq!(frame_loop.run().await.unwrap(), 1);

    // no further cycle is scheduled once the limit is hit
    assert_eq!(ticks.get(), 1);
    assert_eq!(frame_loop.sink().frames().len(), 1);
}

#[tokio::test]
async fn test_idle_loop_never_ticks() {
    let scheduler = CountingScheduler::default();
    let ticks = Rc::clone(&scheduler.ticks);
    let mut frame_loop: FrameLoop<_, _, _, NearestUpscaler> = FrameLoop::new(
        MemorySource::new(vec![gray(0)]),
        MemorySink::new(),
        scheduler,
        Pipeline::default(),
    );

    assert!(matches!(frame_loop.run().await, Err(VideoError::NotLoaded)));
    assert_eq!(ticks.get(), 0);
}

#[tokio::test]
async fn test_closed_output_ends_loop() {
    let source = MemorySource::new(vec![gray(0)]).with_looping(true);
    let sink = ClosingSink {
        open_for: 2,
        received: 0,
    };
    let mut frame_loop = FrameLoop::new(
        source,
        sink,
        ImmediateScheduler,
        Pipeline::new(PipelineConfig::default()),
    );
    frame_loop.load(NearestUpscaler::new(1));

    assert!(matches!(frame_loop.run().await, Err(VideoError::Closed)));
    assert_eq!(frame_loop.frame_count(), 2);
    assert_eq!(frame_loop.sink().received, 2);
    assert_eq!(VideoError::Closed.to_string(), "output closed");
}
