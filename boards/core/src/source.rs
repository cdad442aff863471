//! Sources of raw hardware identifiers.
//!
//! [`HardwareInfo`] supplies named cpuinfo fields, [`NativePlatform`] wraps an
//! optional platform helper. Both report missing data as `None`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::{debug, trace};

pub const CPUINFO: &str = "/proc/cpuinfo";
pub const DMI_BOARD_NAME: &str = "/sys/class/dmi/id/board_name";

/// Name reported by the native helper on a MinnowBoard MAX
pub const MINNOWBOARD_MAX_PLATFORM: &str = "MinnowBoard MAX";

/// Key/value hardware descriptor, eg. the fields of `/proc/cpuinfo`
pub trait HardwareInfo {
    fn field(&self, name: &str) -> Option<String>;
}

/// Optional native platform query
pub trait NativePlatform {
    fn platform_name(&self) -> Option<String>;
}

impl<T: HardwareInfo + ?Sized> HardwareInfo for &T {
    fn field(&self, name: &str) -> Option<String> {
        (**self).field(name)
    }
}

impl<T: HardwareInfo + ?Sized> HardwareInfo for Box<T> {
    fn field(&self, name: &str) -> Option<String> {
        (**self).field(name)
    }
}

impl<T: NativePlatform + ?Sized> NativePlatform for &T {
    fn platform_name(&self) -> Option<String> {
        (**self).platform_name()
    }
}

impl<T: NativePlatform + ?Sized> NativePlatform for Box<T> {
    fn platform_name(&self) -> Option<String> {
        (**self).platform_name()
    }
}

/// Fields read from a cpuinfo file on first access.
///
/// A missing or unreadable file leaves every field absent.
#[derive(Debug)]
pub struct CpuInfo {
    path: PathBuf,
    fields: OnceLock<HashMap<String, String>>,
}

impl Default for CpuInfo {
    fn default() -> Self {
        Self::new(CPUINFO)
    }
}

impl CpuInfo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            fields: OnceLock::new(),
        }
    }

    /// Build a source from already loaded cpuinfo text
    pub fn parse(contents: &str) -> Self {
        let fields = OnceLock::new();
        let _ = fields.set(parse_fields(contents));
        Self {
            path: PathBuf::new(),
            fields,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn fields(&self) -> &HashMap<String, String> {
        self.fields.get_or_init(|| match fs::read_to_string(&self.path) {
            Ok(contents) => parse_fields(&contents),
            Err(e) => {
                debug!("cannot read {}: {e}", self.path.display());
                HashMap::new()
            },
        })
    }
}

impl HardwareInfo for CpuInfo {
    fn field(&self, name: &str) -> Option<String> {
        let value = self.fields().get(name).cloned();
        trace!(field = name, ?value, "cpuinfo lookup");
        value
    }
}

/// Parse `Key<whitespace>: value` lines. The first occurrence of a key wins.
fn parse_fields(contents: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    for line in contents.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        fields
            .entry(key.to_string())
            .or_insert_with(|| value.trim().to_string());
    }
    fields
}

/// Helper used when no native platform library is available
#[derive(Clone, Copy, Debug, Default)]
pub struct NoNativePlatform;

impl NativePlatform for NoNativePlatform {
    fn platform_name(&self) -> Option<String> {
        None
    }
}

/// Platform name from the DMI board name, which x86 SBCs like the
/// MinnowBoard expose through sysfs.
#[derive(Clone, Debug)]
pub struct DmiPlatform {
    path: PathBuf,
}

impl Default for DmiPlatform {
    fn default() -> Self {
        Self::new(DMI_BOARD_NAME)
    }
}

impl DmiPlatform {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl NativePlatform for DmiPlatform {
    fn platform_name(&self) -> Option<String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("no dmi board name at {}: {e}", self.path.display());
                return None;
            },
        };
        let name = raw.trim();
        if name.is_empty() {
            return None;
        }

        // firmware revisions append suffixes like "D0 PLATFORM"
        let prefix = MINNOWBOARD_MAX_PLATFORM.len();
        if name.len() >= prefix
            && name.is_char_boundary(prefix)
            && name[..prefix].eq_ignore_ascii_case(MINNOWBOARD_MAX_PLATFORM)
        {
            return Some(MINNOWBOARD_MAX_PLATFORM.to_string());
        }
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const PI3_CPUINFO: &str = "processor\t: 0
model name\t: ARMv7 Processor rev 4 (v7l)
BogoMIPS\t: 38.40

processor\t: 1
model name\t: ARMv7 Processor rev 4 (v7l)

Hardware\t: BCM2835
Revision\t: a22082
Serial\t\t: 00000000abcdef01
";

    #[test]
    fn parses_cpuinfo_fields() {
        let info = CpuInfo::parse(PI3_CPUINFO);
        assert_eq!(info.field("Hardware").as_deref(), Some("BCM2835"));
        assert_eq!(info.field("Revision").as_deref(), Some("a22082"));
        assert_eq!(info.field("Serial").as_deref(), Some("00000000abcdef01"));
        assert_eq!(info.field("model name").as_deref(), Some("ARMv7 Processor rev 4 (v7l)"));
        assert_eq!(info.field("hardware"), None);
        assert_eq!(info.field("Model"), None);
    }

    #[test]
    fn first_occurrence_wins() {
        let info = CpuInfo::parse("processor : 0\nprocessor : 1\n");
        assert_eq!(info.field("processor").as_deref(), Some("0"));
    }

    #[test]
    fn reads_file_once() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Hardware\t: BCM2709\nRevision\t: a01041\n").unwrap();

        let info = CpuInfo::new(file.path());
        assert_eq!(info.field("Revision").as_deref(), Some("a01041"));

        // later changes to the file are not observed
        std::fs::write(file.path(), "Hardware\t: BCM2708\n").unwrap();
        assert_eq!(info.field("Hardware").as_deref(), Some("BCM2709"));
        assert_eq!(info.field("Revision").as_deref(), Some("a01041"));
    }

    #[test]
    fn missing_cpuinfo_has_no_fields() {
        let dir = tempfile::tempdir().unwrap();
        let info = CpuInfo::new(dir.path().join("cpuinfo"));
        assert_eq!(info.field("Hardware"), None);
    }

    #[test]
    fn no_native_platform_is_absent() {
        assert_eq!(NoNativePlatform.platform_name(), None);
    }

    #[test]
    fn dmi_minnowboard_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board_name");

        std::fs::write(&path, "Minnowboard Max D0 PLATFORM\n").unwrap();
        assert_eq!(
            DmiPlatform::new(&path).platform_name().as_deref(),
            Some(MINNOWBOARD_MAX_PLATFORM)
        );

        std::fs::write(&path, "X570 AORUS ELITE\n").unwrap();
        assert_eq!(
            DmiPlatform::new(&path).platform_name().as_deref(),
            Some("X570 AORUS ELITE")
        );

        std::fs::write(&path, "\n").unwrap();
        assert_eq!(DmiPlatform::new(&path).platform_name(), None);
    }

    #[test]
    fn dmi_missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(DmiPlatform::new(dir.path().join("nope")).platform_name(), None);
    }
}
