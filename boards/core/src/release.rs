//! Vendor release files such as `/etc/armbian-release`.

use std::fs;
use std::path::Path;

use crate::error::Result;

pub const ARMBIAN_RELEASE: &str = "/etc/armbian-release";

/// Value of the first `BOARD=` assignment, taken verbatim to the end of line
pub fn parse_board(contents: &str) -> Option<String> {
    contents.lines().find_map(|line| {
        line.find("BOARD=")
            .map(|at| line[at + "BOARD=".len()..].to_string())
    })
}

/// Read a release file and extract its board
pub fn read_board(path: &Path) -> Result<Option<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(parse_board(&contents))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NANOPI_RELEASE: &str = "# PLEASE DO NOT EDIT THIS FILE
BOARD=nanopi-neo
BOARD_NAME=\"NanoPi Neo\"
BOARDFAMILY=sun8i
VERSION=5.60
LINUXFAMILY=sunxi
BRANCH=next
";

    #[test]
    fn first_board_line() {
        assert_eq!(parse_board(NANOPI_RELEASE).as_deref(), Some("nanopi-neo"));
    }

    #[test]
    fn board_may_appear_mid_line() {
        assert_eq!(parse_board("export BOARD=orangepipc\n").as_deref(), Some("orangepipc"));
    }

    #[test]
    fn value_is_not_normalized() {
        assert_eq!(parse_board("BOARD= Rock64 \n").as_deref(), Some(" Rock64 "));
        assert_eq!(parse_board("BOARD=\n").as_deref(), Some(""));
    }

    #[test]
    fn no_board_line() {
        assert_eq!(parse_board("BOARD_NAME=\"NanoPi Neo\"\nBOARDFAMILY=sun8i\n"), None);
        assert_eq!(parse_board(""), None);
    }

    #[test]
    fn read_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_board(&dir.path().join("armbian-release")).is_err());
    }

    #[test]
    fn read_release_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("armbian-release");
        std::fs::write(&path, NANOPI_RELEASE).unwrap();
        assert_eq!(read_board(&path).unwrap().as_deref(), Some("nanopi-neo"));
    }
}
