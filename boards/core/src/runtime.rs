//! Description of the host operating system.

use sysinfo::System;

/// Host OS facts consumed by detection
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Runtime {
    linux: bool,
    platform: String,
}

impl Runtime {
    /// Describe the running host
    pub fn current() -> Self {
        if std::env::consts::OS != "linux" {
            return Self::other();
        }
        Self::linux(platform_description())
    }

    /// A Linux host with the given platform description
    pub fn linux(platform: impl Into<String>) -> Self {
        Self {
            linux: true,
            platform: platform.into(),
        }
    }

    /// A host where hardware descriptors are meaningless
    pub fn other() -> Self {
        Self {
            linux: false,
            platform: String::new(),
        }
    }

    /// Replace the platform description, keeping the os
    pub fn with_platform(self, platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            ..self
        }
    }

    pub fn is_linux(&self) -> bool {
        self.linux
    }

    /// Platform description, eg. `Linux-4.19.66-v7+-armv7l-with-debian-10`
    pub fn platform(&self) -> &str {
        &self.platform
    }
}

/// `<system>-<kernel>-<arch>-with-<distribution>-<version>`, skipping
/// whatever the host does not report.
fn platform_description() -> String {
    let mut parts = vec!["Linux".to_string()];
    parts.extend(System::kernel_version());
    parts.push(System::cpu_arch());
    parts.push("with".to_string());
    parts.push(System::distribution_id());
    parts.extend(System::os_version());
    parts.retain(|p| !p.is_empty());
    parts.join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_runtime_is_not_linux() {
        let rt = Runtime::other();
        assert!(!rt.is_linux());
        assert_eq!(rt.platform(), "");
    }

    #[test]
    fn platform_override() {
        let rt = Runtime::linux("Linux-5.10-aarch64").with_platform("armv7l-with-debian-buster");
        assert!(rt.is_linux());
        assert_eq!(rt.platform(), "armv7l-with-debian-buster");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn current_linux_description() {
        let rt = Runtime::current();
        assert!(rt.is_linux());
        assert!(rt.platform().starts_with("Linux-"), "{}", rt.platform());
        assert!(rt.platform().contains("-with-"), "{}", rt.platform());
    }
}
