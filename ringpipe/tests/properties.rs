//! Property tests for the byte stream carried by a pipe.
//!
//! A single thread drives random writes and reads against a `VecDeque`
//! model. Writes that would block are skipped, so every case runs to the end.

use std::collections::VecDeque;

use giztoy_ringpipe::{PipeError, RingPipe};
use proptest::prelude::*;

const PROPTEST_CASES: u32 = 256;
const MAX_CAPACITY: usize = 16;

#[derive(Debug, Clone)]
enum Op {
    Write(Vec<u8>),
    Read(usize),
    Close,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => prop::collection::vec(any::<u8>(), 0..=MAX_CAPACITY + 4).prop_map(Op::Write),
        4 => (0..=MAX_CAPACITY + 2).prop_map(Op::Read),
        1 => Just(Op::Close),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    #[test]
    fn prop_stream_matches_vecdeque(
        capacity in 1..=MAX_CAPACITY,
        ops in prop::collection::vec(op_strategy(), 1..128),
    ) {
        let pipe = RingPipe::with_capacity(capacity);
        let mut model: VecDeque<u8> = VecDeque::with_capacity(capacity);
        let mut closed = false;
        let mut written = Vec::new();
        let mut consumed = Vec::new();

        for op in ops {
            match op {
                Op::Write(data) => {
                    let accepted = data.len().min(capacity);
                    if !closed && accepted > capacity - model.len() {
                        // Would block forever on a single thread.
                        continue;
                    }
                    let result = pipe.write(&data);
                    if closed {
                        prop_assert_eq!(result, Err(PipeError::Closed));
                    } else if accepted < data.len() {
                        prop_assert_eq!(
                            result,
                            Err(PipeError::ShortWrite { written: capacity, requested: data.len() })
                        );
                        model.extend(&data[..accepted]);
                        written.extend_from_slice(&data[..accepted]);
                    } else {
                        prop_assert_eq!(result, Ok(data.len()));
                        model.extend(&data);
                        written.extend_from_slice(&data);
                    }
                }
                Op::Read(size) => {
                    let mut buf = vec![0u8; size];
                    let result = pipe.read(&mut buf);
                    if model.is_empty() && closed {
                        prop_assert_eq!(result, Err(PipeError::EndOfStream));
                    } else {
                        let expected = size.min(model.len());
                        prop_assert_eq!(result, Ok(expected));
                        let want: Vec<u8> = model.drain(..expected).collect();
                        prop_assert_eq!(&buf[..expected], &want[..]);
                        consumed.extend_from_slice(&buf[..expected]);
                    }
                }
                Op::Close => {
                    pipe.close();
                    closed = true;
                }
            }

            prop_assert_eq!(pipe.len(), model.len());
            prop_assert_eq!(pipe.len() + pipe.free(), capacity);
            prop_assert_eq!(pipe.is_closed(), closed);
        }

        // Whatever is still buffered comes out last, in order.
        let mut rest = vec![0u8; capacity];
        let n = pipe.read(&mut rest).unwrap_or(0);
        consumed.extend_from_slice(&rest[..n]);
        prop_assert_eq!(consumed, written);
    }

    #[test]
    fn prop_oversized_write_keeps_prefix(
        capacity in 1..=MAX_CAPACITY,
        extra in 1..32usize,
        seed in any::<u8>(),
    ) {
        let pipe = RingPipe::with_capacity(capacity);
        let payload: Vec<u8> = (0..capacity + extra).map(|i| seed.wrapping_add(i as u8)).collect();

        let result = pipe.write(&payload);
        prop_assert_eq!(
            result,
            Err(PipeError::ShortWrite { written: capacity, requested: payload.len() })
        );

        let mut buf = vec![0u8; payload.len()];
        prop_assert_eq!(pipe.read(&mut buf), Ok(capacity));
        prop_assert_eq!(&buf[..capacity], &payload[..capacity]);
        prop_assert_eq!(pipe.read(&mut buf), Ok(0));
    }
}
