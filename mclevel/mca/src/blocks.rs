//! Splitting 12-bit block IDs into the low byte ("Blocks") and high nibble ("Add") arrays, and merging
//! them back.

/// Splits each ID into its low 8 bits and its high 4 bits, one value per byte in both outputs.
/// Bits above the 12th are dropped.
pub fn split(ids: &[u16]) -> (Vec<u8>, Vec<u8>) {
	let low = ids.iter().map(|&id| id as u8).collect();
	let high = ids.iter().map(|&id| ((id >> 8) & 0xF) as u8).collect();

	(low, high)
}

/// Merges the low and high halves back into IDs as `low | (high << 8)`.
///
/// # Panics
/// If the two halves are not the same length.
pub fn merge(low: &[u8], high: &[u8]) -> Vec<u16> {
	assert_eq!(low.len(), high.len(), "block ID halves differ in length");

	low.iter().zip(high).map(|(&low, &high)| (low as u16) | (((high & 0xF) as u16) << 8)).collect()
}

/// Merges only the low halves, for sections stored without an Add array.
pub fn merge_low(low: &[u8]) -> Vec<u16> {
	low.iter().map(|&low| low as u16).collect()
}
