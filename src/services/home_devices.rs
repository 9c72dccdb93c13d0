// src/services/home_devices.rs
use std::{collections::BTreeMap, fmt, sync::Arc};

use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Device {
    Lamp,
    Light,
    Door,
    Fan,
    AirConditioner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCommand {
    On,
    Off,
    Status,
}

impl Device {
    pub const ALL: [Device; 5] =
        [Device::Lamp, Device::Light, Device::Door, Device::Fan, Device::AirConditioner];

    /// First device named in the (lowercased) message.
    pub fn detect(msg_lower: &str) -> Option<Device> {
        const NAMES: &[(&str, Device)] = &[
            ("lamp", Device::Lamp),
            ("light", Device::Light),
            ("door", Device::Door),
            ("fan", Device::Fan),
            ("air", Device::AirConditioner),
        ];
        NAMES
            .iter()
            .filter_map(|(name, device)| msg_lower.find(*name).map(|pos| (pos, *device)))
            .min_by_key(|(pos, _)| *pos)
            .map(|(_, device)| device)
    }

    pub fn state_label(self, on: bool) -> &'static str {
        match (self, on) {
            (Device::Door, true) => "open",
            (Device::Door, false) => "closed",
            (_, true) => "on",
            (_, false) => "off",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Device::Lamp => "lamp",
            Device::Light => "light",
            Device::Door => "door",
            Device::Fan => "fan",
            Device::AirConditioner => "air conditioner",
        };
        f.write_str(name)
    }
}

impl DeviceCommand {
    pub fn detect(msg_lower: &str) -> Option<DeviceCommand> {
        // First match wins.
        const PHRASES: &[(&str, DeviceCommand)] = &[
            ("turn on", DeviceCommand::On),
            ("switch on", DeviceCommand::On),
            ("turn off", DeviceCommand::Off),
            ("switch off", DeviceCommand::Off),
            ("unlock", DeviceCommand::On),
            ("open", DeviceCommand::On),
            ("close", DeviceCommand::Off),
            ("lock", DeviceCommand::Off),
            ("status", DeviceCommand::Status),
        ];
        PHRASES
            .iter()
            .find(|(phrase, _)| msg_lower.contains(*phrase))
            .map(|(_, command)| *command)
    }
}

/// Simulated device states. Everything starts off/closed.
#[derive(Debug, Clone, Default)]
pub struct DeviceManager {
    inner: Arc<RwLock<BTreeMap<Device, bool>>>,
}

impl DeviceManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, device: Device, on: bool) {
        let mut guard = self.inner.write().await;
        guard.insert(device, on);
    }

    pub async fn is_on(&self, device: Device) -> bool {
        let guard = self.inner.read().await;
        guard.get(&device).copied().unwrap_or(false)
    }

    pub async fn snapshot(&self) -> Vec<(Device, bool)> {
        let guard = self.inner.read().await;
        Device::ALL
            .iter()
            .map(|device| (*device, guard.get(device).copied().unwrap_or(false)))
            .collect()
    }

    /// Run a command and describe the result. `device` is required for on/off.
    pub async fn execute(&self, device: Option<Device>, command: DeviceCommand) -> Option<String> {
        match (device, command) {
            (Some(device), DeviceCommand::On) => {
                self.set(device, true).await;
                Some(match device {
                    Device::Door => "Opening the door.".to_string(),
                    _ => format!("Turning on the {}.", device),
                })
            }
            (Some(device), DeviceCommand::Off) => {
                self.set(device, false).await;
                Some(match device {
                    Device::Door => "Closing the door.".to_string(),
                    _ => format!("Turning off the {}.", device),
                })
            }
            (Some(device), DeviceCommand::Status) => {
                let on = self.is_on(device).await;
                Some(format!("The {} is {}.", device, device.state_label(on)))
            }
            (None, DeviceCommand::Status) => {
                let lines: Vec<String> = self
                    .snapshot()
                    .await
                    .into_iter()
                    .map(|(device, on)| format!("{}: {}", device, device.state_label(on)))
                    .collect();
                Some(format!("Device status:\n{}", lines.join("\n")))
            }
            (None, _) => None,
        }
    }
}
