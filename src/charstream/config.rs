//! Tunables for a [`crate::charstream::DecodingCharStream`], set once at
//! open time. Chained-setter builder, matching the teacher's `*_config.rs`
//! modules.

use crate::charstream::transducer::TransducerOption;
use crate::error::Error;

const DEFAULT_TAB_WIDTH: u32 = 4;
const DEFAULT_READ_AHEAD_HIGH_WATER: usize = 64 * 1024;
const DEFAULT_BYTE_CHUNK_SIZE: usize = 4 * 1024;

#[derive(Clone, Debug)]
pub struct StreamConfig {
    tab_width: u32,
    auto_close: bool,
    read_ahead_high_water: usize,
    byte_chunk_size: usize,
    transducer_option: TransducerOption,
}

impl Default for StreamConfig {
    fn default() -> StreamConfig {
        StreamConfig {
            tab_width: DEFAULT_TAB_WIDTH,
            auto_close: true,
            read_ahead_high_water: DEFAULT_READ_AHEAD_HIGH_WATER,
            byte_chunk_size: DEFAULT_BYTE_CHUNK_SIZE,
            transducer_option: TransducerOption::None,
        }
    }
}

impl StreamConfig {
    pub fn new() -> StreamConfig {
        StreamConfig::default()
    }

    pub fn tab_width(mut self, width: u32) -> Result<StreamConfig, Error> {
        if width == 0 {
            return Err(Error::InvalidState("tab_width must be >= 1".to_string()));
        }
        self.tab_width = width;
        Ok(self)
    }

    /// Whether the source is closed automatically once it and the
    /// transducer are fully drained. Defaults to `true`.
    pub fn auto_close(mut self, auto_close: bool) -> StreamConfig {
        self.auto_close = auto_close;
        self
    }

    /// Producer stops decoding ahead once the buffered, unread grapheme
    /// count reaches this many, resuming once the consumer drains below it.
    pub fn read_ahead_high_water(mut self, count: usize) -> StreamConfig {
        self.read_ahead_high_water = count;
        self
    }

    pub fn byte_chunk_size(mut self, bytes: usize) -> StreamConfig {
        self.byte_chunk_size = bytes.max(1);
        self
    }

    pub fn transducer_option(mut self, option: TransducerOption) -> StreamConfig {
        self.transducer_option = option;
        self
    }

    pub(crate) fn get_tab_width(&self) -> u32 {
        self.tab_width
    }

    pub(crate) fn get_auto_close(&self) -> bool {
        self.auto_close
    }

    pub(crate) fn get_read_ahead_high_water(&self) -> usize {
        self.read_ahead_high_water
    }

    pub(crate) fn get_byte_chunk_size(&self) -> usize {
        self.byte_chunk_size
    }

    pub(crate) fn get_transducer_option(&self) -> TransducerOption {
        self.transducer_option
    }
}

#[cfg(test)]
mod config_test {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = StreamConfig::new();
        assert_eq!(cfg.get_tab_width(), 4);
        assert!(cfg.get_auto_close());
        assert_eq!(cfg.get_read_ahead_high_water(), 64 * 1024);
        assert_eq!(cfg.get_byte_chunk_size(), 4 * 1024);
    }

    #[test]
    fn rejects_zero_tab_width() {
        assert!(StreamConfig::new().tab_width(0).is_err());
    }

    #[test]
    fn chained_setters_compose() {
        let cfg = StreamConfig::new()
            .tab_width(8)
            .unwrap()
            .auto_close(false)
            .read_ahead_high_water(10)
            .byte_chunk_size(256);
        assert_eq!(cfg.get_tab_width(), 8);
        assert!(!cfg.get_auto_close());
        assert_eq!(cfg.get_read_ahead_high_water(), 10);
        assert_eq!(cfg.get_byte_chunk_size(), 256);
    }
}
