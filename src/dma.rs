//! Block-copy DMA engine: eight independent channels, each copying a start
//! request's data into memory and then raising IRQ3. No bus arbitration, no
//! cycle timing — a channel transfer completes synchronously within
//! `start_dma`. Channels 0 and 1 start pre-configured with zeroed params (a
//! zero-length transfer that still raises IRQ3), matching the conventional
//! controller defaults; channels 2-7 are genuinely undefined until a caller
//! configures them.

use std::sync::Arc;

use crate::error::Result;
use crate::interrupts::InterruptController;
use crate::memory::Memory;

const CHANNEL_COUNT: usize = 8;

#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelParams {
    pub address: u32,
    pub count: u32,
    pub mode: u8,
}

pub struct DmaController {
    channels: [Option<ChannelParams>; CHANNEL_COUNT],
    ic: Arc<InterruptController>,
}

impl DmaController {
    pub fn new(ic: Arc<InterruptController>) -> Self {
        let mut channels = [None; CHANNEL_COUNT];
        channels[0] = Some(ChannelParams::default());
        channels[1] = Some(ChannelParams::default());
        DmaController { channels, ic }
    }

    pub fn set_channel_params(&mut self, channel: usize, address: u32, count: u32, mode: u8) {
        if let Some(slot) = self.channels.get_mut(channel) {
            *slot = Some(ChannelParams { address, count, mode });
        }
    }

    /// Writes `min(data.len(), channel.count)` bytes to memory at the
    /// channel's configured address, then raises IRQ3. A channel with no
    /// configured parameters (anything outside the pre-configured 0/1), or
    /// an out-of-range channel id, is a no-op.
    pub fn start_dma(&mut self, channel: usize, memory: &mut Memory, data: &[u8]) -> Result<()> {
        let params = match self.channels.get(channel).and_then(|c| *c) {
            Some(p) => p,
            None => return Ok(()),
        };
        let len = (params.count as usize).min(data.len());
        memory.write_bytes(params.address, &data[..len])?;
        self.ic.request_irq(3);
        Ok(())
    }
}
