/// Occurrence counts for every byte value seen in an input.
///
/// Counts live in a fixed 256-slot array so iteration is always in ascending
/// byte order, which keeps tree construction reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self { counts: [0; 256] }
    }
}

impl FrequencyTable {
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::default();
        for &byte in data {
            table.counts[byte as usize] += 1;
        }
        table
    }

    pub fn count(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Present symbols with their counts, ascending by byte value.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(byte, &count)| (byte as u8, count))
    }

    /// Number of distinct byte values present.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.distinct() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_each_byte() {
        let table = FrequencyTable::from_bytes(b"aaab");
        assert_eq!(table.count(b'a'), 3);
        assert_eq!(table.count(b'b'), 1);
        assert_eq!(table.count(b'c'), 0);
        assert_eq!(table.distinct(), 2);
        assert_eq!(table.total(), 4);
    }

    #[test]
    fn empty_input_has_no_entries() {
        let table = FrequencyTable::from_bytes(&[]);
        assert!(table.is_empty());
        assert_eq!(table.iter().count(), 0);
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn iterates_in_byte_order_and_skips_absent() {
        let table = FrequencyTable::from_bytes(&[0xff, 0x00, 0x7f, 0xff]);
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![(0x00, 1), (0x7f, 1), (0xff, 2)]);
    }

    #[test]
    fn handles_every_byte_value() {
        let data: Vec<u8> = (0..=255u8).collect();
        let table = FrequencyTable::from_bytes(&data);
        assert_eq!(table.distinct(), 256);
        assert!(table.iter().all(|(_, count)| count == 1));
    }
}
