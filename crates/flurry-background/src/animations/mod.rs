pub mod liquid;
pub mod snow;
