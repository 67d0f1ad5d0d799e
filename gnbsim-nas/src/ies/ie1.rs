//! Type 1 information elements (half-octet values)

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Packs a half-octet IEI and value into one octet (TV type 1 layout).
pub const fn tv1(iei: u8, value: u8) -> u8 {
    ((iei & 0x0F) << 4) | (value & 0x0F)
}

/// Identity type carried in the first octet of a 5GS mobile identity (TS 24.501 9.11.3.4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum IdentityType {
    #[default]
    NoIdentity = 0b000,
    Suci = 0b001,
    Guti = 0b010,
    Imei = 0b011,
    Tmsi = 0b100,
    ImeiSv = 0b101,
}

/// SUPI format inside a SUCI (TS 24.501 9.11.3.4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum SupiFormat {
    #[default]
    Imsi = 0b000,
    NetworkSpecificIdentifier = 0b001,
}

/// 5GS registration type value (TS 24.501 9.11.3.7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum RegistrationType {
    #[default]
    InitialRegistration = 0b001,
    MobilityRegistrationUpdating = 0b010,
    PeriodicRegistrationUpdating = 0b011,
    EmergencyRegistration = 0b100,
}

/// 5GS registration type IE: follow-on request bit plus registration type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ie5gsRegistrationType {
    /// Follow-on request pending (FOR bit)
    pub follow_on_request: bool,
    /// Registration type value
    pub registration_type: RegistrationType,
}

impl Ie5gsRegistrationType {
    /// FOR bit within the half octet.
    pub const FOLLOW_ON_REQUEST_PENDING: u8 = 0x08;

    /// Initial registration with a pending follow-on request.
    pub const fn initial() -> Self {
        Self {
            follow_on_request: true,
            registration_type: RegistrationType::InitialRegistration,
        }
    }

    /// Half-octet value.
    pub fn encode(&self) -> u8 {
        let for_bit = if self.follow_on_request {
            Self::FOLLOW_ON_REQUEST_PENDING
        } else {
            0
        };
        for_bit | u8::from(self.registration_type)
    }

    /// Parses a half-octet value; `None` for reserved registration types.
    pub fn decode(value: u8) -> Option<Self> {
        Some(Self {
            follow_on_request: value & Self::FOLLOW_ON_REQUEST_PENDING != 0,
            registration_type: RegistrationType::try_from(value & 0x07).ok()?,
        })
    }
}

/// Type of security context flag (TSC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum SecurityContextType {
    #[default]
    Native = 0,
    Mapped = 1,
}

/// NAS key set identifier (TS 24.501 9.11.3.32)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NasKeySetIdentifier {
    /// Type of security context
    pub tsc: SecurityContextType,
    /// Key set identifier, 7 meaning no key is available
    pub ksi: u8,
}

impl NasKeySetIdentifier {
    /// KSI value signalling that no key is available
    pub const NO_KEY_AVAILABLE: u8 = 0x07;

    /// Creates an identifier; `ksi` is masked to 3 bits.
    pub const fn new(tsc: SecurityContextType, ksi: u8) -> Self {
        Self { tsc, ksi: ksi & 0x07 }
    }

    /// The "no key available" identifier used before any AKA run.
    pub const fn no_key() -> Self {
        Self::new(SecurityContextType::Native, Self::NO_KEY_AVAILABLE)
    }

    /// Returns true if this is the "no key available" value.
    pub fn is_no_key(&self) -> bool {
        self.ksi == Self::NO_KEY_AVAILABLE
    }

    /// Half-octet value.
    pub fn encode(&self) -> u8 {
        (u8::from(self.tsc) << 3) | self.ksi
    }

    /// Parses a half-octet value. Every value is valid.
    pub fn decode(value: u8) -> Self {
        let tsc = if value & 0x08 != 0 {
            SecurityContextType::Mapped
        } else {
            SecurityContextType::Native
        };
        Self::new(tsc, value)
    }
}

impl Default for NasKeySetIdentifier {
    fn default() -> Self {
        Self::no_key()
    }
}

/// Request type carried in UL NAS transport (TS 24.501 9.11.3.47)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum RequestType {
    #[default]
    InitialRequest = 0b001,
    ExistingPduSession = 0b010,
    InitialEmergencyRequest = 0b011,
    ExistingEmergencyPduSession = 0b100,
}

/// Payload container type (TS 24.501 9.11.3.40)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum PayloadContainerType {
    #[default]
    N1SmInformation = 0x01,
    Sms = 0x02,
    Lpp = 0x03,
    SorTransparentContainer = 0x04,
}

/// PDU session type (TS 24.501 9.11.4.11)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum PduSessionType {
    #[default]
    Ipv4 = 0b001,
    Ipv6 = 0b010,
    Ipv4v6 = 0b011,
    Unstructured = 0b100,
    Ethernet = 0b101,
}

/// SSC mode (TS 24.501 9.11.4.16)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum SscMode {
    #[default]
    Mode1 = 0b001,
    Mode2 = 0b010,
    Mode3 = 0b011,
}
