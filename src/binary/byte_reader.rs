pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pub offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub fn is_finished(&self) -> bool {
        self.number_of_bytes_left() == 0
    }

    pub fn number_of_bytes_left(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    pub fn read_byte(&mut self) -> Option<u8> {
        let byte = self.bytes.get(self.offset).copied()?;
        self.offset += 1;

        Some(byte)
    }

    pub fn read_bytes(&mut self, size: usize) -> Option<&'a [u8]> {
        let end = self.offset.checked_add(size)?;
        let result = self.bytes.get(self.offset..end)?;
        self.offset = end;

        Some(result)
    }

    pub fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        self.read_bytes(N)?.try_into().ok()
    }

    pub fn read_i32_le(&mut self) -> Option<i32> {
        Some(i32::from_le_bytes(self.read_array()?))
    }

    pub fn rest(&mut self) -> &'a [u8] {
        let start = self.offset.min(self.bytes.len());
        self.offset = self.bytes.len();

        &self.bytes[start..]
    }

    pub fn skip_whitespace(&mut self) {
        while self
            .bytes
            .get(self.offset)
            .is_some_and(|&byte| Self::is_whitespace(byte))
        {
            self.offset += 1;
        }
    }

    pub fn skip_single_whitespace(&mut self) -> Option<()> {
        let byte = *self.bytes.get(self.offset)?;
        if !Self::is_whitespace(byte) {
            return None;
        }
        self.offset += 1;

        Some(())
    }

    fn skip_line(&mut self) {
        while let Some(byte) = self.read_byte() {
            if Self::is_newline(byte) {
                break;
            }
        }
    }

    fn read_until_whitespace(&mut self) -> Option<&'a [u8]> {
        self.skip_whitespace();
        let start = self.offset;

        while self
            .bytes
            .get(self.offset)
            .is_some_and(|&byte| !Self::is_whitespace(byte))
        {
            self.offset += 1;
        }

        if start == self.offset {
            return None;
        }

        Some(&self.bytes[start..self.offset])
    }

    pub fn read_ppm_symbol(&mut self) -> Option<&'a [u8]> {
        loop {
            self.skip_whitespace();

            if self.bytes.get(self.offset) == Some(&PPM_COMMENT_START_BYTE) {
                self.skip_line();
                continue;
            }

            return self.read_until_whitespace();
        }
    }

    fn is_whitespace(byte: u8) -> bool {
        WHITESPACE_SYMBOLS.contains(&byte)
    }

    fn is_newline(byte: u8) -> bool {
        NEWLINE_SYMBOLS.contains(&byte)
    }
}

const WHITESPACE_SYMBOLS: [u8; 6] = [10, 32, 13, 9, 11, 12];
const NEWLINE_SYMBOLS: [u8; 2] = [13, 10];
const PPM_COMMENT_START_BYTE: u8 = b'#';
