//! Mock construction helpers

use mpu60x0_logger::backend::{
    BackendKind, BackendStats, BusError, I2cBus, RawSample, SensorBackend, SimulatedBackend,
};
use mpu60x0_logger::error::{Result, SensorError};
use mpu60x0_logger::types::{RangeConfiguration, MPU60X0_DEVICE_ID};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Backend wrapping the simulator with injectable faults
pub struct ScriptedBackend {
    inner: SimulatedBackend,
    id: u8,
    refuse_attach: bool,
    fail_after: Option<u64>,
    cancel_after: Option<(u64, Arc<AtomicBool>)>,
    detached: Arc<AtomicBool>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            inner: SimulatedBackend::new(),
            id: MPU60X0_DEVICE_ID,
            refuse_attach: false,
            fail_after: None,
            cancel_after: None,
            detached: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Report this identifier from `who_am_i`
    pub fn with_id(mut self, id: u8) -> Self {
        self.id = id;
        self
    }

    pub fn refusing_attach(mut self) -> Self {
        self.refuse_attach = true;
        self
    }

    /// Fail every sample after `n` successful ones
    pub fn failing_after(mut self, n: u64) -> Self {
        self.fail_after = Some(n);
        self
    }

    /// Raise `flag` once `n` samples were produced
    pub fn cancelling_after(mut self, n: u64, flag: Arc<AtomicBool>) -> Self {
        self.cancel_after = Some((n, flag));
        self
    }

    /// Flag set when the device handle lets go of this backend
    pub fn detached_flag(&self) -> Arc<AtomicBool> {
        self.detached.clone()
    }
}

impl SensorBackend for ScriptedBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Simulated
    }

    fn attach(&mut self, address: u8) -> Result<()> {
        if self.refuse_attach {
            return Err(SensorError::AllocationFailure {
                address,
                reason: "no such device".to_string(),
            });
        }
        self.inner.attach(address)
    }

    fn detach(&mut self) {
        self.detached.store(true, Ordering::SeqCst);
        self.inner.detach();
    }

    fn who_am_i(&mut self) -> Result<u8> {
        Ok(self.id)
    }

    fn read_configuration(&mut self) -> Result<RangeConfiguration> {
        self.inner.read_configuration()
    }

    fn write_configuration(&mut self, config: RangeConfiguration) -> Result<()> {
        self.inner.write_configuration(config)
    }

    fn sample(&mut self, ranges: RangeConfiguration) -> Result<RawSample> {
        let produced = self.inner.stats().samples_read;
        if matches!(self.fail_after, Some(n) if produced >= n) {
            return Err(SensorError::Bus {
                address: self.inner.address().unwrap_or(0),
                message: "scripted failure".to_string(),
            });
        }
        let sample = self.inner.sample(ranges)?;
        if let Some((n, ref flag)) = self.cancel_after {
            if produced + 1 >= n {
                flag.store(true, Ordering::SeqCst);
            }
        }
        Ok(sample)
    }

    fn stats(&self) -> &BackendStats {
        self.inner.stats()
    }
}

/// In-memory register file standing in for an MPU-60X0 on the bus
#[derive(Clone)]
pub struct RegisterBus {
    address: u8,
    registers: Arc<Mutex<[u8; 128]>>,
}

impl RegisterBus {
    pub fn new(address: u8) -> Self {
        let mut registers = [0u8; 128];
        registers[0x6B] = 0x40; // sleeping after reset
        registers[0x75] = MPU60X0_DEVICE_ID;
        Self {
            address,
            registers: Arc::new(Mutex::new(registers)),
        }
    }

    pub fn register(&self, index: u8) -> u8 {
        self.registers.lock().unwrap()[index as usize]
    }

    pub fn set_register(&self, index: u8, value: u8) {
        self.registers.lock().unwrap()[index as usize] = value;
    }

    /// Store 16-bit big-endian words starting at `index`
    pub fn set_words(&self, index: u8, words: &[i16]) {
        let mut regs = self.registers.lock().unwrap();
        for (i, word) in words.iter().enumerate() {
            let [hi, lo] = word.to_be_bytes();
            regs[index as usize + 2 * i] = hi;
            regs[index as usize + 2 * i + 1] = lo;
        }
    }
}

impl I2cBus for RegisterBus {
    fn write(&mut self, address: u8, data: &[u8]) -> std::result::Result<(), BusError> {
        if address != self.address {
            return Err(BusError::Nack);
        }
        let (start, values) = data.split_first().ok_or(BusError::Bus("empty write".into()))?;
        let mut regs = self.registers.lock().unwrap();
        for (i, value) in values.iter().enumerate() {
            regs[*start as usize + i] = *value;
        }
        Ok(())
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buffer: &mut [u8],
    ) -> std::result::Result<(), BusError> {
        if address != self.address {
            return Err(BusError::Nack);
        }
        let start = *write_data.first().ok_or(BusError::Bus("missing register".into()))? as usize;
        let regs = self.registers.lock().unwrap();
        read_buffer.copy_from_slice(&regs[start..start + read_buffer.len()]);
        Ok(())
    }
}

/// Cloneable sink whose contents stay readable after the writer is gone
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> Vec<u8> {
        self.0.lock().unwrap().clone()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
