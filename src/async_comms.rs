use core::fmt::Debug;

use crate::capacity::{self, Capacity, ERASED_VALUE, MAX_PAGE_SIZE};
use crate::comms::{PROBE_VALUE, REF_VALUE};
/// Refer to datasheet:
/// https://ww1.microchip.com/downloads/en/DeviceDoc/doc0670.pdf
use crate::error::Error;
use crate::traits::AsyncEepromDevice;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{I2c, Operation};
use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes};

pub struct AsyncEepromI2c<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    capacity: Capacity,
}

impl<I2C, D> Debug for AsyncEepromI2c<I2C, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AsyncEepromI2c")
            .field("address", &self.address)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<I2C, D> AsyncEepromDevice for AsyncEepromI2c<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = Error<I2C>;

    /// Reads chip contents into `buf`, starting at `position`.
    ///
    /// The 2-byte position is sent as a dummy write without a stop condition,
    /// then a repeated start switches the bus to a sequential read. Reads are
    /// not page-limited, so one transaction covers any in-bounds length.
    async fn retrieve_stream(&mut self, position: u16, buf: &mut [u8]) -> Result<(), Error<I2C>> {
        self.check_position(position, buf.len())?;
        self.i2c
            .transaction(
                self.address,
                &mut [
                    Operation::Write(&position.to_be_bytes()),
                    Operation::Read(buf),
                ],
            )
            .await
            .map_err(Error::I2c)
    }

    /// Writes `data` to the chip starting at `position`, split into one
    /// transaction per physical page; an unaligned start gets a short first
    /// chunk. Completed chunks stay written when a later one fails.
    async fn store_stream(&mut self, position: u16, data: &[u8]) -> Result<(), Error<I2C>> {
        self.check_position(position, data.len())?;
        let page_size = self.capacity.page_size();
        let mut offset = 0usize;
        while offset < data.len() {
            let pos = position + offset as u16;
            let to_boundary = page_size - pos as usize % page_size;
            let chunk = (data.len() - offset).min(to_boundary);
            self.write_page(pos, &data[offset..offset + chunk]).await?;
            offset += chunk;
        }
        Ok(())
    }

    /// Writes `len` copies of `value` starting at `position`, with `len`
    /// clamped to the remaining capacity. A clamp down to zero is still a
    /// position error.
    async fn fill(&mut self, position: u16, len: u16, value: u8) -> Result<(), Error<I2C>> {
        let remaining = self.capacity.bytes().saturating_sub(u32::from(position));
        let len = u32::from(len).min(remaining) as usize;
        self.check_position(position, len)?;
        let page = [value; MAX_PAGE_SIZE];
        let page_size = self.capacity.page_size();
        let mut offset = 0usize;
        while offset < len {
            let pos = position + offset as u16;
            let to_boundary = page_size - pos as usize % page_size;
            let chunk = (len - offset).min(to_boundary);
            self.write_page(pos, &page[..chunk]).await?;
            offset += chunk;
        }
        Ok(())
    }

    /// Sets the whole chip to the erased state of all 1s (FFh), one fill per
    /// physical page. A failed page aborts the erase.
    async fn erase(&mut self) -> Result<(), Error<I2C>> {
        let page_size = self.capacity.page_size() as u32;
        for page in 0..self.capacity.pages() {
            self.fill((page * page_size) as u16, page_size as u16, ERASED_VALUE)
                .await?;
        }
        Ok(())
    }
}

impl<I2C, D> AsyncEepromI2c<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Creates a driver for the chip of the given capacity at `address`,
    /// clamped into the range the chip family decodes.
    pub fn new(i2c: I2C, delay: D, capacity: Capacity, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address: capacity::clamp_address(address),
            capacity,
        }
    }

    /// Reconfigures the driver for another chip type or address, typically
    /// after [`detect_type`](Self::detect_type).
    pub fn begin(&mut self, capacity: Capacity, address: u8) {
        self.capacity = capacity;
        self.address = capacity::clamp_address(address);
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Gives back the bus and delay provider.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Stores a fixed-size value at `position` through the paged writer.
    pub async fn store<T: IntoBytes + Immutable>(
        &mut self,
        position: u16,
        value: &T,
    ) -> Result<(), Error<I2C>> {
        self.store_stream(position, value.as_bytes()).await
    }

    /// Retrieves a fixed-size value from `position`.
    pub async fn retrieve<T: FromBytes + IntoBytes>(
        &mut self,
        position: u16,
    ) -> Result<T, Error<I2C>> {
        let mut value = T::new_zeroed();
        self.retrieve_stream(position, value.as_mut_bytes()).await?;
        Ok(value)
    }

    /// Sequential read starting at the chip's current internal address
    /// counter. No position is sent, so no bounds check is possible.
    pub async fn retrieve_current(&mut self, buf: &mut [u8]) -> Result<(), Error<I2C>> {
        if buf.is_empty() {
            return Err(Error::Position);
        }
        self.i2c
            .transaction(self.address, &mut [Operation::Read(buf)])
            .await
            .map_err(Error::I2c)
    }

    /// Detects the chip capacity by exploiting address-space rollover; see
    /// the blocking driver for the probe mechanics. Destructive, and the
    /// driver should be configured for the largest capacity first. On success
    /// the detected capacity also replaces the configured one.
    pub async fn detect_type(&mut self) -> Result<Capacity, Error<I2C>> {
        for probe_bit in (1..=9u8).rev() {
            self.store_stream(0, &[REF_VALUE]).await?;
            // The probe goes straight to the bus: the configured capacity is
            // provisional here and must not bounds-check the probe position.
            let probe_position: u16 = 1 << (probe_bit + 6);
            self.write_page(probe_position, &[PROBE_VALUE]).await?;
            let mut read_back = [0u8; 1];
            self.retrieve_stream(0, &mut read_back).await?;
            if read_back[0] == REF_VALUE {
                let detected = Capacity::from_bit(probe_bit);
                #[cfg(feature = "defmt-03")]
                defmt::debug!("detected capacity bit {}", probe_bit);
                self.capacity = detected;
                return Ok(detected);
            }
        }
        Err(Error::Position)
    }

    /// Bounds gate every positioned read/write passes before touching the
    /// bus.
    fn check_position(&self, position: u16, len: usize) -> Result<(), Error<I2C>> {
        if len == 0 || u64::from(position) + len as u64 > u64::from(self.capacity.bytes()) {
            return Err(Error::Position);
        }
        Ok(())
    }

    /// One write transaction of position prefix plus data, followed by the
    /// chip's write-settle delay. `data` must not cross a page boundary.
    async fn write_page(&mut self, position: u16, data: &[u8]) -> Result<(), Error<I2C>> {
        self.i2c
            .transaction(
                self.address,
                &mut [
                    Operation::Write(&position.to_be_bytes()),
                    Operation::Write(data),
                ],
            )
            .await
            .map_err(Error::I2c)?;
        self.delay.delay_ms(self.capacity.write_delay_ms()).await;
        Ok(())
    }
}
