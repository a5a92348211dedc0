#![forbid(unsafe_code)]

//! Point-in-time captures of field state with a stable checksum.

const FNV64_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV64_PRIME: u64 = 0x0000_0100_0000_01B3;

/// Motion state of one blob at capture time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlobSnapshot {
    pub drift_x: f64,
    pub drift_y: f64,
    pub vx: f64,
    pub vy: f64,
    pub wander_timer: u32,
    /// Offset that would be presented at the capture time.
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Motion state of a whole field.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldSnapshot {
    pub frame_idx: u64,
    pub blobs: Vec<BlobSnapshot>,
}

impl FieldSnapshot {
    /// FNV-1a 64 over the frame index and every blob's fields (f64 values by
    /// bit pattern, little-endian).
    pub fn checksum(&self) -> u64 {
        let mut hash = FNV64_OFFSET_BASIS;
        let mut feed = |bytes: &[u8]| {
            for &byte in bytes {
                hash ^= u64::from(byte);
                hash = hash.wrapping_mul(FNV64_PRIME);
            }
        };
        feed(&self.frame_idx.to_le_bytes());
        for blob in &self.blobs {
            for value in [
                blob.drift_x,
                blob.drift_y,
                blob.vx,
                blob.vy,
                blob.offset_x,
                blob.offset_y,
            ] {
                feed(&value.to_bits().to_le_bytes());
            }
            feed(&blob.wander_timer.to_le_bytes());
        }
        hash
    }
}
