use block_bitmap::{BLOCK_BITS, BitMap, block_count, render};
use proptest::prelude::*;
use proptest::sample::Index;

fn padding_is_clear(bitmap: &BitMap) -> bool {
    let used = bitmap.bit_capacity() % BLOCK_BITS;
    match bitmap.blocks().last() {
        Some(last) if used != 0 => last >> used == 0,
        _ => true,
    }
}

// Strategy for bitmaps of arbitrary capacity and content
prop_compose! {
    fn arb_bitmap(max_bits: usize)
        (bits in prop::collection::vec(any::<bool>(), 0..max_bits))
        -> BitMap
    {
        bits.into_iter().collect()
    }
}

// Strategy for a bitmap together with a column count to lay it out
prop_compose! {
    fn arb_grid(max_bits: usize)
        (bitmap in arb_bitmap(max_bits), columns in 1usize..40)
        -> (BitMap, usize)
    {
        (bitmap, columns)
    }
}

proptest! {
    #[test]
    fn test_set_then_test(bitmap in arb_bitmap(300), idx in 0usize..300) {
        let mut bitmap = bitmap;
        if idx < bitmap.bit_capacity() {
            bitmap.set(idx).unwrap();
            prop_assert_eq!(bitmap.test(idx), Ok(true));
            bitmap.clear(idx).unwrap();
            prop_assert_eq!(bitmap.test(idx), Ok(false));
        } else {
            let before = bitmap.clone();
            prop_assert!(bitmap.set(idx).is_err());
            prop_assert!(bitmap.clear(idx).is_err());
            prop_assert!(bitmap.test(idx).is_err());
            prop_assert!(bitmap.toggle(idx).is_err());
            prop_assert_eq!(bitmap.blocks(), before.blocks());
        }
    }

    #[test]
    fn test_set_touches_only_target(bitmap in arb_bitmap(300), pick in any::<Index>()) {
        prop_assume!(bitmap.bit_capacity() > 0);
        let idx = pick.index(bitmap.bit_capacity());
        let mut after = bitmap.clone();
        after.set(idx).unwrap();
        for (i, (old, new)) in bitmap.iter().zip(after.iter()).enumerate() {
            if i == idx {
                prop_assert!(new);
            } else {
                prop_assert_eq!(old, new, "Bit {} changed", i);
            }
        }
    }

    #[test]
    fn test_invert_all_twice_is_identity(bitmap in arb_bitmap(300)) {
        let mut inverted = bitmap.clone();
        inverted.invert_all();
        prop_assert_eq!(inverted.popcount(), bitmap.bit_capacity() - bitmap.popcount());
        prop_assert!(padding_is_clear(&inverted));
        inverted.invert_all();
        prop_assert_eq!(inverted, bitmap);
    }

    #[test]
    fn test_invert_column_twice_is_identity(
        (bitmap, columns) in arb_grid(300),
        pick in any::<Index>()
    ) {
        let column = pick.index(columns) + 1;
        let mut inverted = bitmap.clone();
        inverted.invert_column(columns, column).unwrap();
        for (i, (old, new)) in bitmap.iter().zip(inverted.iter()).enumerate() {
            prop_assert_eq!(old != new, i % columns == column - 1, "Bit {}", i);
        }
        prop_assert!(padding_is_clear(&inverted));
        inverted.invert_column(columns, column).unwrap();
        prop_assert_eq!(inverted, bitmap);
    }

    #[test]
    fn test_invert_row_twice_is_identity(
        (bitmap, columns) in arb_grid(300),
        pick in any::<Index>()
    ) {
        let rows = bitmap.row_count(columns);
        prop_assume!(rows > 0);
        let row = pick.index(rows) + 1;
        let mut inverted = bitmap.clone();
        inverted.invert_row(columns, row).unwrap();
        for (i, (old, new)) in bitmap.iter().zip(inverted.iter()).enumerate() {
            prop_assert_eq!(old != new, i / columns == row - 1, "Bit {}", i);
        }
        prop_assert!(padding_is_clear(&inverted));
        inverted.invert_row(columns, row).unwrap();
        prop_assert_eq!(inverted, bitmap);
    }

    #[test]
    fn test_invalid_regions_do_not_mutate(
        (bitmap, columns) in arb_grid(300),
        selector in 0usize..400
    ) {
        let mut target = bitmap.clone();
        if selector == 0 || selector > columns {
            prop_assert!(target.invert_column(columns, selector).is_err());
        }
        if selector == 0 || selector > bitmap.row_count(columns) {
            prop_assert!(target.invert_row(columns, selector).is_err());
        }
        prop_assert_eq!(target, bitmap);
    }

    #[test]
    fn test_render_matches_bits((bitmap, columns) in arb_grid(300)) {
        let text = render(&bitmap, columns);
        prop_assert!(text.ends_with('\n'));
        let rows: Vec<&str> = text.lines().collect();
        prop_assert_eq!(rows.len(), bitmap.row_count(columns).max(1));
        let tokens: Vec<bool> = rows
            .iter()
            .flat_map(|row| row.split(' '))
            .filter(|token| !token.is_empty())
            .map(|token| token == "1")
            .collect();
        prop_assert_eq!(tokens, bitmap.iter().collect::<Vec<_>>());
        for row in &rows[..rows.len() - 1] {
            prop_assert_eq!(row.split(' ').count(), columns);
        }
    }

    #[test]
    fn test_block_count_is_minimal(bits in 1usize..1_000_000) {
        let blocks = block_count(bits);
        prop_assert!(blocks * BLOCK_BITS >= bits);
        prop_assert!((blocks - 1) * BLOCK_BITS < bits);
    }
}
