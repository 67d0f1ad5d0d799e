//! NAS protocol enumerations (3GPP TS 24.501)

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Extended Protocol Discriminator (TS 24.501 9.2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum ExtendedProtocolDiscriminator {
    /// 5GS Mobility Management
    MobilityManagement = 0x7E,
    /// 5GS Session Management
    SessionManagement = 0x2E,
}

/// Security Header Type (TS 24.501 9.3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum SecurityHeaderType {
    /// Plain NAS message
    #[default]
    NotProtected = 0x00,
    /// Integrity protected
    IntegrityProtected = 0x01,
    /// Integrity protected and ciphered
    IntegrityProtectedAndCiphered = 0x02,
    /// Integrity protected with new 5G NAS security context
    IntegrityProtectedWithNewSecurityContext = 0x03,
    /// Integrity protected and ciphered with new 5G NAS security context
    IntegrityProtectedAndCipheredWithNewSecurityContext = 0x04,
}

impl SecurityHeaderType {
    /// Returns true for any header other than plain.
    pub fn is_protected(self) -> bool {
        self != SecurityHeaderType::NotProtected
    }
}

/// 5GMM message type (TS 24.501 9.7, table 9.7.1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum MmMessageType {
    RegistrationRequest = 0x41,
    RegistrationAccept = 0x42,
    RegistrationComplete = 0x43,
    RegistrationReject = 0x44,
    DeregistrationRequestUeOriginating = 0x45,
    DeregistrationAcceptUeOriginating = 0x46,
    DeregistrationRequestUeTerminated = 0x47,
    DeregistrationAcceptUeTerminated = 0x48,
    ServiceRequest = 0x4C,
    ServiceReject = 0x4D,
    ServiceAccept = 0x4E,
    ConfigurationUpdateCommand = 0x54,
    ConfigurationUpdateComplete = 0x55,
    AuthenticationRequest = 0x56,
    AuthenticationResponse = 0x57,
    AuthenticationReject = 0x58,
    AuthenticationFailure = 0x59,
    AuthenticationResult = 0x5A,
    IdentityRequest = 0x5B,
    IdentityResponse = 0x5C,
    SecurityModeCommand = 0x5D,
    SecurityModeComplete = 0x5E,
    SecurityModeReject = 0x5F,
    FiveGMmStatus = 0x64,
    Notification = 0x65,
    NotificationResponse = 0x66,
    UlNasTransport = 0x67,
    DlNasTransport = 0x68,
}

impl MmMessageType {
    /// Human-readable message name used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            MmMessageType::RegistrationRequest => "Registration Request",
            MmMessageType::RegistrationAccept => "Registration Accept",
            MmMessageType::RegistrationComplete => "Registration Complete",
            MmMessageType::RegistrationReject => "Registration Reject",
            MmMessageType::DeregistrationRequestUeOriginating => "Deregistration Request (UE originating)",
            MmMessageType::DeregistrationAcceptUeOriginating => "Deregistration Accept (UE originating)",
            MmMessageType::DeregistrationRequestUeTerminated => "Deregistration Request (UE terminated)",
            MmMessageType::DeregistrationAcceptUeTerminated => "Deregistration Accept (UE terminated)",
            MmMessageType::ServiceRequest => "Service Request",
            MmMessageType::ServiceReject => "Service Reject",
            MmMessageType::ServiceAccept => "Service Accept",
            MmMessageType::ConfigurationUpdateCommand => "Configuration Update Command",
            MmMessageType::ConfigurationUpdateComplete => "Configuration Update Complete",
            MmMessageType::AuthenticationRequest => "Authentication Request",
            MmMessageType::AuthenticationResponse => "Authentication Response",
            MmMessageType::AuthenticationReject => "Authentication Reject",
            MmMessageType::AuthenticationFailure => "Authentication Failure",
            MmMessageType::AuthenticationResult => "Authentication Result",
            MmMessageType::IdentityRequest => "Identity Request",
            MmMessageType::IdentityResponse => "Identity Response",
            MmMessageType::SecurityModeCommand => "Security Mode Command",
            MmMessageType::SecurityModeComplete => "Security Mode Complete",
            MmMessageType::SecurityModeReject => "Security Mode Reject",
            MmMessageType::FiveGMmStatus => "5GMM Status",
            MmMessageType::Notification => "Notification",
            MmMessageType::NotificationResponse => "Notification Response",
            MmMessageType::UlNasTransport => "UL NAS Transport",
            MmMessageType::DlNasTransport => "DL NAS Transport",
        }
    }
}

/// 5GSM message types sent by the simulated device (TS 24.501 table 9.7.2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum SmMessageType {
    PduSessionEstablishmentRequest = 0xC1,
    PduSessionEstablishmentAccept = 0xC2,
    PduSessionEstablishmentReject = 0xC3,
    PduSessionReleaseRequest = 0xD1,
    PduSessionReleaseCommand = 0xD3,
    PduSessionReleaseComplete = 0xD4,
    FiveGSmStatus = 0xD6,
}

impl SmMessageType {
    /// Human-readable message name used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            SmMessageType::PduSessionEstablishmentRequest => "PDU Session Establishment Request",
            SmMessageType::PduSessionEstablishmentAccept => "PDU Session Establishment Accept",
            SmMessageType::PduSessionEstablishmentReject => "PDU Session Establishment Reject",
            SmMessageType::PduSessionReleaseRequest => "PDU Session Release Request",
            SmMessageType::PduSessionReleaseCommand => "PDU Session Release Command",
            SmMessageType::PduSessionReleaseComplete => "PDU Session Release Complete",
            SmMessageType::FiveGSmStatus => "5GSM Status",
        }
    }
}

/// 5GMM cause values used by the authentication procedure (TS 24.501 9.11.3.2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum MmCause {
    /// #20 MAC failure
    MacFailure = 0x14,
    /// #21 Synch failure
    SynchFailure = 0x15,
    /// #26 Non-5G authentication unacceptable
    Non5gAuthenticationUnacceptable = 0x1A,
    /// #71 ngKSI already in use
    NgksiAlreadyInUse = 0x47,
}
