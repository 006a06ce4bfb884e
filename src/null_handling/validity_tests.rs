//==================================================================================
// Unit Tests (validity masks against Arrow's NullBuffer)
//==================================================================================

#[cfg(test)]
mod tests {
    use crate::config::GenerationStrategy;
    use crate::error::BitmapError;
    use crate::memory_pool::{BudgetedMemoryPool, SystemMemoryPool};
    use crate::null_handling::validity::*;
    use arrow::array::{Array, Int32Array};
    use arrow::buffer::{Buffer, NullBuffer};

    fn validity_of(nulls: &NullBuffer) -> Vec<bool> {
        (0..nulls.len()).map(|i| nulls.is_valid(i)).collect()
    }

    #[test]
    fn test_validity_from_bools_to_null_buffer() {
        let pool = SystemMemoryPool::new();
        let values = vec![true, false, true, true, false, true, true, true, false, true];
        let buffer =
            validity_from_bools(&pool, GenerationStrategy::Unrolled, &values).unwrap();
        assert_eq!(buffer.len(), 2);

        let nulls = to_null_buffer(buffer, 0, values.len()).unwrap();
        assert_eq!(nulls.null_count(), 3);
        assert_eq!(validity_of(&nulls), values);
    }

    #[test]
    fn test_both_strategies_build_identical_masks() {
        let pool = SystemMemoryPool::new();
        let values: Vec<bool> = (0..37).map(|i| i % 5 != 0).collect();
        let simple = validity_from_bools(&pool, GenerationStrategy::Simple, &values).unwrap();
        let unrolled = validity_from_bools(&pool, GenerationStrategy::Unrolled, &values).unwrap();
        assert_eq!(simple.as_slice(), unrolled.as_slice());
    }

    #[test]
    fn test_null_count_matches_arrow() {
        let source_array = Int32Array::from(vec![Some(10), None, Some(30), None, None, Some(1)]);
        let nulls = source_array.nulls().unwrap();
        let inner = nulls.inner();
        assert_eq!(
            null_count(inner.values(), inner.offset(), inner.len()),
            source_array.null_count()
        );
        assert_eq!(null_count(&[], 0, 0), 0);
    }

    #[test]
    fn test_to_null_buffer_rejects_short_buffer() {
        let buffer = Buffer::from(vec![0xFFu8]);
        let result = to_null_buffer(buffer, 3, 6);
        assert!(matches!(
            result,
            Err(BitmapError::BufferTooSmall {
                required_bits: 9,
                available_bits: 8
            })
        ));
    }

    #[test]
    fn test_slice_validity_realigns() {
        let pool = SystemMemoryPool::new();
        let nulls = NullBuffer::from(vec![true, false, true, true, false, false, true, true, false]);
        let sliced = slice_validity(&pool, &nulls, 3, 5).unwrap();
        assert_eq!(sliced.inner().offset(), 0);
        assert_eq!(validity_of(&sliced), vec![true, false, false, true, true]);

        // Slicing an already-offset NullBuffer composes both offsets.
        let pre_sliced = nulls.slice(2, 7);
        let sliced = slice_validity(&pool, &pre_sliced, 1, 4).unwrap();
        assert_eq!(validity_of(&sliced), vec![true, false, false, true]);

        assert!(slice_validity(&pool, &nulls, 5, 5).is_err());
    }

    #[test]
    fn test_combine_validity() {
        let pool = SystemMemoryPool::new();
        let left = NullBuffer::from(vec![true, true, false, false, true]);
        let right = NullBuffer::from(vec![true, false, true, false, true]);

        assert!(combine_validity(&pool, None, None).unwrap().is_none());

        let only_left = combine_validity(&pool, Some(&left), None).unwrap().unwrap();
        assert_eq!(validity_of(&only_left), validity_of(&left));

        let both = combine_validity(&pool, Some(&left), Some(&right))
            .unwrap()
            .unwrap();
        assert_eq!(validity_of(&both), vec![true, false, false, false, true]);
        assert_eq!(both.null_count(), 3);
    }

    #[test]
    fn test_combine_validity_errors() {
        let short = NullBuffer::from(vec![true, false]);
        let long = NullBuffer::from(vec![true, false, true]);
        let pool = SystemMemoryPool::new();
        assert!(matches!(
            combine_validity(&pool, Some(&short), Some(&long)),
            Err(BitmapError::LengthMismatch { left: 2, right: 3 })
        ));

        // Pool exhaustion propagates unchanged.
        let empty_pool = BudgetedMemoryPool::new(0);
        let result = combine_validity(&empty_pool, Some(&long), Some(&long));
        assert!(matches!(
            result,
            Err(BitmapError::AllocationFailure { requested: 1, .. })
        ));
    }
}
