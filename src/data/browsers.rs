//! Browser release history and usage share

use crate::browsers::Version;

/// One released browser version with its global usage share in percent
#[derive(Debug, Clone, Copy)]
pub struct Release {
    pub version: Version,
    pub share: f64,
}

/// Static description of a browser
#[derive(Debug)]
pub struct BrowserData {
    pub name: &'static str,
    pub title: &'static str,
    pub aliases: &'static [&'static str],
    pub prefix: &'static str,
    /// Versions from which the browser switched to another prefix, oldest first
    pub prefix_changes: &'static [(Version, &'static str)],
    /// Released versions, newest first
    pub released: &'static [Release],
    /// Announced but unreleased versions, newest first
    pub future: &'static [Version],
    /// Only selected when named explicitly
    pub minor: bool,
}

const fn v(major: u16, minor: u16) -> Version {
    Version::new(major, minor)
}

const fn r(major: u16, minor: u16, share: f64) -> Release {
    Release {
        version: v(major, minor),
        share,
    }
}

pub static BROWSERS: &[BrowserData] = &[
    BrowserData {
        name: "chrome",
        title: "Chrome",
        aliases: &[],
        prefix: "-webkit-",
        prefix_changes: &[],
        released: &[
            r(31, 0, 0.51),
            r(30, 0, 14.62),
            r(29, 0, 9.84),
            r(28, 0, 1.22),
            r(27, 0, 0.61),
            r(26, 0, 0.33),
            r(25, 0, 0.24),
            r(24, 0, 0.19),
            r(23, 0, 0.16),
            r(22, 0, 0.21),
            r(21, 0, 0.23),
            r(20, 0, 0.09),
            r(19, 0, 0.07),
            r(18, 0, 0.08),
            r(17, 0, 0.06),
            r(16, 0, 0.05),
            r(15, 0, 0.04),
            r(14, 0, 0.04),
            r(13, 0, 0.03),
            r(12, 0, 0.03),
            r(11, 0, 0.05),
            r(10, 0, 0.03),
            r(9, 0, 0.02),
            r(8, 0, 0.02),
            r(7, 0, 0.02),
            r(6, 0, 0.01),
            r(5, 0, 0.01),
            r(4, 0, 0.01),
        ],
        future: &[v(33, 0), v(32, 0)],
        minor: false,
    },
    BrowserData {
        name: "ff",
        title: "Firefox",
        aliases: &["firefox", "fx"],
        prefix: "-moz-",
        prefix_changes: &[],
        released: &[
            r(25, 0, 0.42),
            r(24, 0, 8.37),
            r(23, 0, 3.14),
            r(22, 0, 0.61),
            r(21, 0, 0.42),
            r(20, 0, 0.33),
            r(19, 0, 0.25),
            r(18, 0, 0.27),
            r(17, 0, 0.29),
            r(16, 0, 0.26),
            r(15, 0, 0.21),
            r(14, 0, 0.14),
            r(13, 0, 0.13),
            r(12, 0, 0.18),
            r(11, 0, 0.12),
            r(10, 0, 0.16),
            r(9, 0, 0.09),
            r(8, 0, 0.11),
            r(7, 0, 0.07),
            r(6, 0, 0.08),
            r(5, 0, 0.08),
            r(4, 0, 0.11),
            r(3, 6, 0.27),
            r(3, 5, 0.06),
            r(3, 0, 0.09),
            r(2, 0, 0.01),
        ],
        future: &[v(27, 0), v(26, 0)],
        minor: false,
    },
    BrowserData {
        name: "ie",
        title: "IE",
        aliases: &["explorer"],
        prefix: "-ms-",
        prefix_changes: &[],
        released: &[
            r(11, 0, 1.03),
            r(10, 0, 7.52),
            r(9, 0, 5.41),
            r(8, 0, 6.83),
            r(7, 0, 0.52),
            r(6, 0, 0.31),
            r(5, 5, 0.01),
        ],
        future: &[],
        minor: false,
    },
    BrowserData {
        name: "safari",
        title: "Safari",
        aliases: &[],
        prefix: "-webkit-",
        prefix_changes: &[],
        released: &[
            r(7, 0, 0.63),
            r(6, 1, 1.12),
            r(6, 0, 1.21),
            r(5, 1, 1.34),
            r(5, 0, 0.31),
            r(4, 0, 0.12),
            r(3, 2, 0.01),
            r(3, 1, 0.01),
        ],
        future: &[],
        minor: false,
    },
    BrowserData {
        name: "opera",
        title: "Opera",
        aliases: &[],
        prefix: "-o-",
        prefix_changes: &[(v(15, 0), "-webkit-")],
        released: &[
            r(17, 0, 0.21),
            r(16, 0, 0.38),
            r(15, 0, 0.12),
            r(12, 1, 0.79),
            r(12, 0, 0.05),
            r(11, 6, 0.03),
            r(11, 5, 0.02),
            r(11, 1, 0.01),
            r(11, 0, 0.01),
            r(10, 6, 0.01),
            r(10, 5, 0.01),
            r(10, 0, 0.01),
            r(9, 5, 0.01),
            r(9, 0, 0.01),
        ],
        future: &[v(18, 0)],
        minor: false,
    },
    BrowserData {
        name: "ios",
        title: "iOS Safari",
        aliases: &["ios_saf"],
        prefix: "-webkit-",
        prefix_changes: &[],
        released: &[
            r(7, 0, 2.24),
            r(6, 0, 3.31),
            r(5, 0, 0.23),
            r(4, 2, 0.09),
            r(4, 0, 0.01),
            r(3, 2, 0.01),
        ],
        future: &[],
        minor: false,
    },
    BrowserData {
        name: "android",
        title: "Android",
        aliases: &[],
        prefix: "-webkit-",
        prefix_changes: &[],
        released: &[
            r(4, 4, 0.02),
            r(4, 3, 0.31),
            r(4, 2, 0.93),
            r(4, 1, 2.18),
            r(4, 0, 0.82),
            r(3, 0, 0.01),
            r(2, 3, 2.97),
            r(2, 2, 0.31),
            r(2, 1, 0.05),
        ],
        future: &[],
        minor: true,
    },
    BrowserData {
        name: "bb",
        title: "Blackberry",
        aliases: &["blackberry"],
        prefix: "-webkit-",
        prefix_changes: &[],
        released: &[r(10, 0, 0.09), r(7, 0, 0.17)],
        future: &[],
        minor: true,
    },
];
