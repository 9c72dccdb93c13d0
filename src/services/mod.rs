pub mod assistants;
pub mod dispatch;
pub mod home_devices;
pub mod intent;
pub mod llm;
pub mod shopping;
