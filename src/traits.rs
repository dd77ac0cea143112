pub trait EepromDevice {
    type Error;

    /// Reads `buf.len()` bytes into `buf`, starting at `position`.
    fn retrieve_stream(&mut self, position: u16, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Writes an arbitrary byte span starting at `position`, split into one
    /// bus transaction per physical write page.
    fn store_stream(&mut self, position: u16, data: &[u8]) -> Result<(), Self::Error>;

    /// Writes `len` copies of `value` starting at `position`, with `len`
    /// clamped to the remaining capacity.
    fn fill(&mut self, position: u16, len: u16, value: u8) -> Result<(), Self::Error>;

    /// Sets the whole chip to the erased state of all 1s (FFh), one page
    /// per transaction.
    fn erase(&mut self) -> Result<(), Self::Error>;
}

#[allow(async_fn_in_trait)]
pub trait AsyncEepromDevice {
    type Error;

    /// Reads `buf.len()` bytes into `buf`, starting at `position`.
    async fn retrieve_stream(&mut self, position: u16, buf: &mut [u8])
        -> Result<(), Self::Error>;

    /// Writes an arbitrary byte span starting at `position`, split into one
    /// bus transaction per physical write page.
    async fn store_stream(&mut self, position: u16, data: &[u8]) -> Result<(), Self::Error>;

    /// Writes `len` copies of `value` starting at `position`, with `len`
    /// clamped to the remaining capacity.
    async fn fill(&mut self, position: u16, len: u16, value: u8) -> Result<(), Self::Error>;

    /// Sets the whole chip to the erased state of all 1s (FFh), one page
    /// per transaction.
    async fn erase(&mut self) -> Result<(), Self::Error>;
}
