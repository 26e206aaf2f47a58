use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum Device {
    Cpu,
    Cuda { device_id: i32 },
    TensorRt { device_id: i32, fp16: bool },
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "CPU"),
            Device::Cuda { device_id } => write!(f, "CUDA(device_id={device_id})"),
            Device::TensorRt { device_id, fp16 } => {
                write!(f, "TensorRT(device_id={device_id}, fp16={fp16})")
            }
        }
    }
}

/// Parses `cpu`, `cuda`, `cuda:<id>`, `tensorrt`, `tensorrt:<id>` and `tensorrt:<id>:fp16`.
impl FromStr for Device {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let mut parts = lower.split(':');
        let kind = parts.next().unwrap_or_default();
        let device_id = match parts.next() {
            Some(id) => id
                .parse::<i32>()
                .map_err(|_| format!("invalid device id in '{s}'"))?,
            None => 0,
        };
        let fp16 = match parts.next() {
            Some("fp16") => true,
            Some(other) => return Err(format!("unknown device flag '{other}'")),
            None => false,
        };
        if parts.next().is_some() {
            return Err(format!("too many segments in '{s}'"));
        }
        match kind {
            "cpu" if lower != "cpu" => Err(format!("cpu takes no device id in '{s}'")),
            "cpu" => Ok(Device::Cpu),
            "cuda" if !fp16 => Ok(Device::Cuda { device_id }),
            "tensorrt" | "trt" => Ok(Device::TensorRt { device_id, fp16 }),
            _ => Err(format!("unknown device '{s}'")),
        }
    }
}
