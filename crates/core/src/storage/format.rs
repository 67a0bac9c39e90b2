use super::encryption::KdfParams;
use crate::errors::CoreError;

/// Magic bytes identifying an EXTK (Expense Tracker) vault file.
pub const MAGIC: &[u8; 4] = b"EXTK";

/// Current vault format version.
pub const CURRENT_VERSION: u16 = 1;

/// Header size in bytes:
/// magic(4) + version(2) + kdf_params(12) + salt(16) + nonce(12) = 46.
/// Everything after the header is ciphertext.
pub const HEADER_SIZE: usize = 46;

/// Header parsed from an encrypted vault file.
#[derive(Debug)]
pub struct VaultHeader {
    pub version: u16,
    pub kdf_params: KdfParams,
    pub salt: [u8; 16],
    pub nonce: [u8; 12],
}

/// Assemble a complete vault file.
///
/// Layout:
/// ```text
/// [EXTK: 4B] [version: 2B LE] [memory_cost: 4B LE] [time_cost: 4B LE]
/// [parallelism: 4B LE] [salt: 16B] [nonce: 12B] [ciphertext: rest]
/// ```
pub fn write_vault(
    version: u16,
    kdf_params: &KdfParams,
    salt: &[u8; 16],
    nonce: &[u8; 12],
    ciphertext: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE + ciphertext.len());

    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&version.to_le_bytes());
    buf.extend_from_slice(&kdf_params.memory_cost.to_le_bytes());
    buf.extend_from_slice(&kdf_params.time_cost.to_le_bytes());
    buf.extend_from_slice(&kdf_params.parallelism.to_le_bytes());
    buf.extend_from_slice(salt);
    buf.extend_from_slice(nonce);
    buf.extend_from_slice(ciphertext);

    buf
}

/// Parse the header from raw vault bytes.
/// Returns the header and the ciphertext slice.
pub fn read_vault(data: &[u8]) -> Result<(VaultHeader, &[u8]), CoreError> {
    if data.len() < HEADER_SIZE {
        return Err(CoreError::InvalidFileFormat(
            "File too small to be a valid EXTK vault".into(),
        ));
    }

    if &data[0..4] != MAGIC {
        return Err(CoreError::InvalidFileFormat(
            "Invalid magic bytes — not an EXTK vault".into(),
        ));
    }

    let mut offset = 4;

    let version = u16::from_le_bytes([data[offset], data[offset + 1]]);
    offset += 2;

    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let memory_cost = read_u32(data, &mut offset, "KDF memory_cost")?;
    let time_cost = read_u32(data, &mut offset, "KDF time_cost")?;
    let parallelism = read_u32(data, &mut offset, "KDF parallelism")?;

    // Bound the KDF parameters so a crafted file cannot demand gigabytes
    // of memory or minutes of hashing before the password check.
    if !(8..=1_048_576).contains(&memory_cost) {
        return Err(CoreError::InvalidFileFormat(format!(
            "KDF memory_cost out of safe range: {memory_cost} KiB (expected 8..1048576)"
        )));
    }
    if !(1..=20).contains(&time_cost) {
        return Err(CoreError::InvalidFileFormat(format!(
            "KDF time_cost out of safe range: {time_cost} (expected 1..20)"
        )));
    }
    if !(1..=16).contains(&parallelism) {
        return Err(CoreError::InvalidFileFormat(format!(
            "KDF parallelism out of safe range: {parallelism} (expected 1..16)"
        )));
    }

    let mut salt = [0u8; 16];
    salt.copy_from_slice(&data[offset..offset + 16]);
    offset += 16;

    let mut nonce = [0u8; 12];
    nonce.copy_from_slice(&data[offset..offset + 12]);
    offset += 12;

    let ciphertext = &data[offset..];

    let header = VaultHeader {
        version,
        kdf_params: KdfParams {
            memory_cost,
            time_cost,
            parallelism,
        },
        salt,
        nonce,
    };

    Ok((header, ciphertext))
}

fn read_u32(data: &[u8], offset: &mut usize, field: &str) -> Result<u32, CoreError> {
    let bytes = data[*offset..*offset + 4]
        .try_into()
        .map_err(|_| CoreError::InvalidFileFormat(format!("Failed to read {field}")))?;
    *offset += 4;
    Ok(u32::from_le_bytes(bytes))
}
