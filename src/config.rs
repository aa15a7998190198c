use crate::error::{CodecError, Result};

pub const LOWER_SEARCH_RANGE: u8 = 1;
pub const UPPER_SEARCH_RANGE: u8 = 15;
pub const DEFAULT_MACRO_SIZE_Y: usize = 16;
pub const DEFAULT_MACRO_SIZE_CRCB: usize = 8;
pub const DCT_BLOCK_SIZE: usize = 8;
pub const DEFAULT_I_FRAME_INTERVAL: usize = 10;

/// Parameters shared by encoder and decoder.
///
/// Nothing here is written to the container, so a video must be decoded with
/// the same macroblock sizes and I-frame interval it was encoded with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodecConfig {
    pub search_area: u8,
    pub macro_size_y: usize,
    pub macro_size_crcb: usize,
    pub dct_block_size: usize,
    pub i_frame_interval: usize,
    pub parallel: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            search_area: UPPER_SEARCH_RANGE,
            macro_size_y: DEFAULT_MACRO_SIZE_Y,
            macro_size_crcb: DEFAULT_MACRO_SIZE_CRCB,
            dct_block_size: DCT_BLOCK_SIZE,
            i_frame_interval: DEFAULT_I_FRAME_INTERVAL,
            parallel: false,
        }
    }
}

impl CodecConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_area(mut self, search_area: u8) -> Self {
        self.search_area = search_area;
        self
    }

    pub fn with_macro_sizes(mut self, macro_size_y: usize, macro_size_crcb: usize) -> Self {
        self.macro_size_y = macro_size_y;
        self.macro_size_crcb = macro_size_crcb;
        self
    }

    pub fn with_dct_block_size(mut self, dct_block_size: usize) -> Self {
        self.dct_block_size = dct_block_size;
        self
    }

    pub fn with_i_frame_interval(mut self, i_frame_interval: usize) -> Self {
        self.i_frame_interval = i_frame_interval;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(LOWER_SEARCH_RANGE..=UPPER_SEARCH_RANGE).contains(&self.search_area) {
            return Err(CodecError::UnsupportedConfig(format!(
                "search area must be between {} and {}, found {}",
                LOWER_SEARCH_RANGE, UPPER_SEARCH_RANGE, self.search_area
            )));
        }

        // quantization tables and the zigzag order are 8x8
        if self.dct_block_size != DCT_BLOCK_SIZE {
            return Err(CodecError::UnsupportedConfig(format!(
                "dct block size must be {}, found {}",
                DCT_BLOCK_SIZE, self.dct_block_size
            )));
        }

        for (name, size) in [
            ("luma", self.macro_size_y),
            ("chroma", self.macro_size_crcb),
        ] {
            if size == 0 || size % self.dct_block_size != 0 {
                return Err(CodecError::UnsupportedConfig(format!(
                    "{} macroblock size must be a positive multiple of {}, found {}",
                    name, self.dct_block_size, size
                )));
            }
        }

        if self.i_frame_interval == 0 {
            return Err(CodecError::UnsupportedConfig(
                "I-frame interval must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn is_intra_frame(&self, index: usize) -> bool {
        index % self.i_frame_interval == 0
    }
}
