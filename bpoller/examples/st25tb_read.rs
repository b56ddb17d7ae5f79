// Read an ST25TB tag through the poller state machine.
//
// No radio is attached here: `SimulatedTag` answers frames the way an
// ST25TB512-AT would, so the example runs anywhere. Set RUST_LOG=trace to
// see every frame.

use anyhow::Context;
use bpoller::buffer::FrameBuffer;
use bpoller::prelude::*;
use bpoller::protocol::crc::{check_crc_b, with_crc_b};

struct SimulatedTag {
    chip_id: u8,
    uid: [u8; 8],
    blocks: [u32; 16],
}

impl SimulatedTag {
    fn answer(&self, cmd: &[u8]) -> Option<Vec<u8>> {
        match cmd {
            [0x06, 0x00] => Some(vec![self.chip_id]),
            [0x0E, id] if *id == self.chip_id => Some(vec![self.chip_id]),
            [0x0B] => {
                let mut wire = self.uid;
                wire.reverse();
                Some(wire.to_vec())
            }
            [0x08, 0xFF] => Some(0xFFFF_FFFFu32.to_le_bytes().to_vec()),
            [0x08, n] => self
                .blocks
                .get(*n as usize)
                .map(|b| b.to_le_bytes().to_vec()),
            _ => None,
        }
    }
}

impl Transceiver for SimulatedTag {
    fn set_guard_time_us(&mut self, _guard_time_us: u32) {}
    fn set_fdt_poll_fc(&mut self, _fdt_poll_fc: u32) {}
    fn set_fdt_poll_poll_us(&mut self, _fdt_poll_poll_us: u32) {}

    fn transceive(
        &mut self,
        tx: &FrameBuffer,
        rx: &mut FrameBuffer,
        _fwt_fc: u32,
    ) -> std::result::Result<(), NfcError> {
        rx.reset();
        let frame = tx.as_slice();
        if !check_crc_b(frame) {
            return Err(NfcError::Timeout);
        }
        let cmd = &frame[..frame.len() - 2];
        let resp = self.answer(cmd).ok_or(NfcError::Timeout)?;
        rx.set(&with_crc_b(&resp))
            .map_err(|_| NfcError::BufferOverflow)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut blocks = [0u32; 16];
    for (i, b) in blocks.iter_mut().enumerate() {
        *b = 0x1111_1111u32.wrapping_mul(i as u32);
    }
    let tag = SimulatedTag {
        chip_id: 0x3A,
        uid: [0xD0, 0x02, 0x0C << 2, 0x12, 0x34, 0x56, 0x78, 0x9A],
        blocks,
    };

    let mut poller = St25tbPoller::new(tag);
    if !poller.detect(NfcEvent::PollerReady) {
        anyhow::bail!("no ST25TB tag in the field");
    }

    poller.set_callback(|ev| match ev.event {
        St25tbPollerEvent::Ready => {
            println!("tag selected (chip id {:?})", ev.instance.chip_id());
            Command::Continue
        }
        St25tbPollerEvent::ReadSuccessful => Command::Stop,
        St25tbPollerEvent::Error(err) => {
            println!("read failed: {}", err);
            Command::Continue
        }
    });
    let ticks = run_until_stop(&mut poller, 10);

    let data = poller.data().context("tag was not read")?;
    println!("{} UID {} ({} ticks)", data.card_type, data.uid.to_hex(), ticks);
    for (i, block) in data.blocks.iter().enumerate() {
        println!("  block {:>3}: {:08X}", i, block);
    }
    println!("  system   : {:08X}", data.system_otp_block);
    Ok(())
}
