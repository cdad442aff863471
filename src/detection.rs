//! Wiring the board identifier to the configured sources.

use sbc_detect_core::{
    BoardIdentifier, CpuInfo, DmiPlatform, NativePlatform, NoNativePlatform, Runtime,
};

use crate::config::Config;

pub type Identifier = BoardIdentifier<CpuInfo, Box<dyn NativePlatform>>;

/// Build an identifier reading from the sources named in the config
pub fn identifier(config: &Config) -> Identifier {
    let sources = &config.sources;

    let mut runtime = Runtime::current();
    if let Some(platform) = &config.runtime.platform {
        runtime = runtime.with_platform(platform.clone());
    }

    let native: Box<dyn NativePlatform> = if sources.native_helper {
        Box::new(DmiPlatform::new(&sources.dmi_board_name))
    } else {
        Box::new(NoNativePlatform)
    };

    BoardIdentifier::new(CpuInfo::new(&sources.cpuinfo), runtime)
        .with_native(native)
        .with_release_file(&sources.armbian_release)
}
