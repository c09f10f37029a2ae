//! Viterbi decoder for the 16-state rate-1/4 mother code, Clause 8.2.3.1.1.

/// Type used to represent input bits. "0" is represented as -1, "1" as +1,
/// and a punctured (erased) position as 0. Soft decision input is possible
/// with larger magnitudes, bounded so path metrics cannot overflow.
pub type SoftBit = i8;

/// Accumulated path metric. 16 bits suffice for the block lengths used on
/// the downlink without renormalization.
type Metric = i16;

/// Constraint length of the mother code.
const K: usize = 5;

const NUM_STATES: usize = 1 << (K - 1);

/// One decision bit per state and trellis step.
type DecisionBitmap = u16;

/// Viterbi decoder for a binary convolutional code of rate 1/N.
pub struct ViterbiDecoder<const N: usize> {
    /// Expected encoder outputs for each state for encoder input "0".
    expected_0: [[SoftBit; NUM_STATES]; N],
}

impl<const N: usize> ViterbiDecoder<N> {
    pub fn new_with_polynomials(generator_polynomials: &[[bool; K]; N]) -> Self {
        // Look-up table for expected encoder output bits. With these
        // generator polynomials the expected outputs for "1" input are the
        // inverse of those for "0", so only the "0" table is materialized.
        let expected_0 = std::array::from_fn(|poly_n| {
            let poly = generator_polynomials[poly_n];
            std::array::from_fn(|state| {
                let mut encoder_output: bool = false;
                // Each bit of the state number corresponds to a past input
                for (bit_i, &tap) in poly.iter().enumerate().take(K - 1) {
                    let past_input_bit = (state & (1 << (K - 2 - bit_i))) != 0;
                    if past_input_bit && tap {
                        encoder_output = !encoder_output;
                    }
                }
                if encoder_output { 1 as SoftBit } else { -1 as SoftBit }
            })
        });
        Self { expected_0 }
    }

    pub fn decode(&self, received_bits: &[SoftBit]) -> Vec<u8> {
        let num_output_bits = received_bits.len() / N;
        let mut trellis_decisions: Vec<DecisionBitmap> = Vec::with_capacity(num_output_bits);

        // The encoder starts from state 0: give it metric 0 and every other
        // state half the maximum, leaving headroom to accumulate.
        let mut metrics: [Metric; NUM_STATES] = [Metric::MAX / 2; NUM_STATES];
        metrics[0] = 0;

        for received_for_one_bit in received_bits.chunks_exact(N) {
            // Branch metrics for encoder input "0"
            let mut branch_metrics_0: [Metric; NUM_STATES] = [0; NUM_STATES];

            for (received_bit, expected_0) in received_for_one_bit.iter().zip(self.expected_0.iter()) {
                for (branch_metric_0, expected_bit_0) in
                    branch_metrics_0.iter_mut().zip(expected_0.iter())
                {
                    *branch_metric_0 -= (received_bit * expected_bit_0) as Metric;
                }
            }

            let mut decisions: DecisionBitmap = 0;

            metrics = std::array::from_fn(|state| {
                // Predecessor states for encoder input 0 and 1
                let predecessor_0 = (state * 2) % NUM_STATES;
                let predecessor_1 = predecessor_0 + 1;
                let metric_0 = metrics[predecessor_0] + branch_metrics_0[state];
                // Expected outputs for input "1" are the inverse of "0", so
                // the "1" branch metric is the negated "0" metric
                let metric_1 = metrics[predecessor_1] - branch_metrics_0[state];

                if metric_1 < metric_0 {
                    // One decision bit suffices: each state has exactly two
                    // possible predecessors
                    decisions |= 1 << state;
                    metric_1
                } else {
                    metric_0
                }
            });
            trellis_decisions.push(decisions);
        }

        // Traceback. Tail bits guarantee the encoder ended in state 0.
        let mut best_state = 0;

        let mut decoded_bits: Vec<u8> = Vec::with_capacity(num_output_bits);
        for decisions in trellis_decisions.iter().rev() {
            decoded_bits.push(((best_state >> (K - 2)) & 1) as u8);
            best_state = best_state * 2 % NUM_STATES + ((*decisions >> best_state) & 1) as usize;
        }
        decoded_bits.reverse();
        decoded_bits
    }
}

/// Decoder for the rate 1/4 mother code.
pub type TetraViterbiDecoder = ViterbiDecoder<4>;

impl TetraViterbiDecoder {
    pub fn new() -> Self {
        Self::new_with_polynomials(&[
            [true, true,  false, false, true],
            [true, false, true,  true,  true],
            [true, true,  true,  false, true],
            [true, true,  false, true,  true],
        ])
    }
}

impl Default for TetraViterbiDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a hard-decision depunctured stream: bytes 0x00/0x01 are strong
/// bits, 0xff marks an erased (punctured) position.
pub fn decode_hard(in_buf: &[u8], out_buf: &mut [u8], sym_count: usize) {
    assert!(in_buf.len() >= sym_count * 4, "in_buf too short");
    assert!(out_buf.len() >= sym_count, "out_buf too short");

    let soft: Vec<SoftBit> = in_buf[..sym_count * 4]
        .iter()
        .map(|&b| match b {
            0x00 => -1, // strong '0'
            0x01 => 1,  // strong '1'
            _ => 0,     // erasure / puncture
        })
        .collect();

    let decoder = TetraViterbiDecoder::new();
    let decoded = decoder.decode(&soft);
    out_buf[..sym_count].copy_from_slice(&decoded[..sym_count]);
}
