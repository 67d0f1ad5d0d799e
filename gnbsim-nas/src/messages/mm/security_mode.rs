//! Security Mode Complete (3GPP TS 24.501 Section 8.2.26)

use bytes::BufMut;

use crate::enums::MmMessageType;
use crate::error::NasResult;
use crate::header::PlainMmHeader;
use crate::ies::ie6::lve_length;
use crate::ies::IeNasMessageContainer;

/// Security Mode Complete message (UE to network)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SecurityModeComplete {
    /// NAS message container (optional, IEI 0x71): the retransmitted initial NAS message
    pub nas_message_container: Option<IeNasMessageContainer>,
}

impl SecurityModeComplete {
    /// Security Mode Complete wrapping `initial_message`, if any.
    pub fn new(initial_message: Option<&[u8]>) -> Self {
        Self {
            nas_message_container: initial_message.map(|pdu| IeNasMessageContainer(pdu.to_vec())),
        }
    }

    /// Encode to bytes (including header)
    pub fn encode<B: BufMut>(&self, buf: &mut B) -> NasResult<()> {
        if let Some(container) = &self.nas_message_container {
            lve_length("NAS message container", &container.0)?;
        }
        PlainMmHeader::new(MmMessageType::SecurityModeComplete).encode(buf);
        if let Some(container) = &self.nas_message_container {
            container.encode(buf)?;
        }
        Ok(())
    }
}
