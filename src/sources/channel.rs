use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// MCP3008 input mode.
///
/// The discriminant is the 4-bit mode code sent in the command frame:
/// single-ended inputs set the top bit (8..=15), differential pairs do not
/// (0..=7).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
#[repr(u8)]
pub enum ChannelId {
    /// CH0 = IN+, CH1 = IN-
    Df0 = 0,
    /// CH0 = IN-, CH1 = IN+
    Df1 = 1,
    /// CH2 = IN+, CH3 = IN-
    Df2 = 2,
    /// CH2 = IN-, CH3 = IN+
    Df3 = 3,
    /// CH4 = IN+, CH5 = IN-
    Df4 = 4,
    /// CH4 = IN-, CH5 = IN+
    Df5 = 5,
    /// CH6 = IN+, CH7 = IN-
    Df6 = 6,
    /// CH6 = IN-, CH7 = IN+
    Df7 = 7,
    #[default]
    Ch0 = 8,
    Ch1 = 9,
    Ch2 = 10,
    Ch3 = 11,
    Ch4 = 12,
    Ch5 = 13,
    Ch6 = 14,
    Ch7 = 15,
}

impl ChannelId {
    #[inline]
    pub const fn mode(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn is_single_ended(self) -> bool {
        self.mode() & 0x08 != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn mode_codes_cover_four_bits() {
        let modes: Vec<u8> = ChannelId::iter().map(ChannelId::mode).collect();
        assert_eq!(modes, (0..16).collect::<Vec<u8>>());
        assert_eq!(ChannelId::default(), ChannelId::Ch0);
        assert_eq!(ChannelId::Ch0.mode(), 8);
    }

    #[test]
    fn single_ended_split() {
        assert!(ChannelId::Ch0.is_single_ended());
        assert!(ChannelId::Ch7.is_single_ended());
        assert!(!ChannelId::Df0.is_single_ended());
        assert!(!ChannelId::Df7.is_single_ended());
    }

    #[test]
    fn names_round_trip_through_strum_and_serde() {
        assert_eq!(ChannelId::Ch3.to_string(), "ch3");
        assert_eq!(ChannelId::from_str("df5").unwrap(), ChannelId::Df5);
        assert_eq!(serde_json::to_string(&ChannelId::Ch1).unwrap(), "\"ch1\"");
        let parsed: ChannelId = serde_json::from_str("\"ch6\"").unwrap();
        assert_eq!(parsed, ChannelId::Ch6);
    }
}
