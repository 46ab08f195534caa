use crate::error::Error;

/// Accumulates the emitted byte stream plus the directive-driven header
/// state, and serializes either the raw stream or an iNES-framed image.
pub struct Cartridge {
    /// Address the next emitted byte is assumed to load at
    pub pc: u16,
    /// Reservation pointer, a separate address space for uninitialized
    /// storage
    pub rs: u16,
    /// Bank number most recently selected with `.bank`
    pub bank: u16,
    pub prg_banks: Option<u8>,
    pub chr_banks: Option<u8>,
    pub mapper: Option<u8>,
    pub mirroring: Option<u8>,
    code: Vec<u8>,
}

impl Cartridge {
    pub fn new() -> Self {
        Cartridge {
            pc: 0,
            rs: 0,
            bank: 0,
            prg_banks: None,
            chr_banks: None,
            mapper: None,
            mirroring: None,
            code: Vec::new(),
        }
    }

    pub fn append(&mut self, bytes: &[u8]) {
        self.code.extend_from_slice(bytes);
        self.pc = self.pc.wrapping_add(bytes.len() as u16);
    }

    /// The code stream as-is, no container framing.
    pub fn raw_code(&self) -> &[u8] {
        &self.code
    }

    /// 16-byte iNES header followed by the code stream, zero-padded out
    /// to the declared PRG/CHR bank boundary. The PRG bank count must
    /// have been set by a directive.
    pub fn ines_code(&self) -> Result<Vec<u8>, Error> {
        let prg = self.prg_banks.ok_or(Error::MissingHeaderField(".inesprg"))?;
        let chr = self.chr_banks.unwrap_or(0);
        let mapper = self.mapper.unwrap_or(0);
        let mirroring = self.mirroring.unwrap_or(0);
        let mut image = vec![
            0x4E,
            0x45,
            0x53,
            0x1A,
            prg,
            chr,
            (mapper & 0x0F) << 4 | (mirroring & 0x01),
            mapper & 0xF0,
            0,
            0,
            0,
            0,
            0,
            0,
            0,
            0,
        ];
        image.extend_from_slice(&self.code);
        let framed = 16 + usize::from(prg) * 16 * 1024 + usize::from(chr) * 8 * 1024;
        if image.len() < framed {
            image.resize(framed, 0);
        }
        Ok(image)
    }
}
