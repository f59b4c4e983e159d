use crate::provider::ProviderError;

/// Why a chat turn failed. `Display` is the message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error("Maaf, saya tidak mengerti kota mana yang dimaksud.")]
    CityNotUnderstood,

    #[error("Tidak bisa terhubung ke server.")]
    Unavailable,

    #[error("Kunci API Anda tidak valid.")]
    Unauthorized,

    #[error("Data perkiraan tidak tersedia.")]
    DataMissing,

    #[error("Data perkiraan tidak tersedia untuk tanggal tersebut.")]
    DayNotAvailable,

    #[error("Terjadi kesalahan. Silakan coba lagi.")]
    Generic,
}

impl From<ProviderError> for TurnError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Unavailable { .. } => TurnError::Unavailable,
            ProviderError::Unauthorized { .. } => TurnError::Unauthorized,
            ProviderError::DataMissing { .. } => TurnError::DataMissing,
            ProviderError::Other { .. } => TurnError::Generic,
        }
    }
}
