use sr_infer::{Device, Inference};

#[test]
fn test_device_display() {
    assert_eq!(Device::Cpu.to_string(), "CPU");
    assert_eq!(Device::Cuda { device_id: 1 }.to_string(), "CUDA(device_id=1)");
}

#[test]
fn test_cpu_to_candle() {
    assert!(Device::Cpu.to_candle().unwrap().is_cpu());
    assert_eq!(Inference::cpu().device(), &Device::Cpu);
}

#[cfg(not(feature = "cuda"))]
#[test]
fn test_cuda_requires_feature() {
    assert!(Device::Cuda { device_id: 0 }.to_candle().is_err());
}
