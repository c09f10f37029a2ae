/// Block interleaving, Clause 8.2.4: bit i of the input block of size K
/// maps to position 1 + (a*i mod K).
pub const fn block_interl_func(k: u32, a: u32, i: u32) -> u32 {
    1 + ((a.wrapping_mul(i)) % k)
}

pub fn block_interleave(k: usize, a: usize, input: &[u8], output: &mut [u8]) {
    assert!(input.len() >= k && output.len() >= k);
    for i in 1..=k {
        let j = block_interl_func(k as u32, a as u32, i as u32) as usize;
        output[j - 1] = input[i - 1];
    }
}

pub fn block_deinterleave(k: usize, a: usize, input: &[u8], output: &mut [u8]) {
    assert!(input.len() >= k && output.len() >= k);
    for i in 1..=k {
        let j = block_interl_func(k as u32, a as u32, i as u32) as usize;
        output[i - 1] = input[j - 1];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_channel_parameters() {
        // the (K, a) pairs actually used by the downlink channels
        for (k, a) in [(120usize, 11usize), (216, 101), (432, 103)] {
            let data: Vec<u8> = (0..k).map(|i| (i % 2) as u8).collect();
            let mut tmp = vec![0u8; k];
            let mut out = vec![0u8; k];

            block_interleave(k, a, &data, &mut tmp);
            assert_ne!(data, tmp);
            block_deinterleave(k, a, &tmp, &mut out);
            assert_eq!(data, out);
        }
    }
}
