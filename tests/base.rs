//! Integration tests for ndbin
//!
//! These tests exercise the array container, the binary codec, and the
//! algebra layer through the public API.

use ndbin::{matrix, parser, transforms, writer, Array, DType, Endianness, NdbinError, MAX_DIMS};

// =============================================================================
// Array lifecycle and reshape
// =============================================================================

#[test]
fn alloc_every_dtype() {
    for dtype in [DType::U8, DType::I32, DType::F32, DType::F64] {
        for extent in [0u32, 1, 7, 1024] {
            let arr = Array::alloc(extent, dtype).unwrap();
            assert_eq!(arr.rank(), 1);
            assert_eq!(arr.num_elements(), extent as usize);
            assert_eq!(arr.as_bytes().len(), extent as usize * dtype.element_size());
        }
    }
}

#[test]
fn flatten_inflate_shape_roundtrip() {
    let mut arr = Array::matrix(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let original = arr.clone();

    arr.flatten();
    assert_eq!(arr.dims(), &[6]);
    assert_eq!(arr.num_elements(), 6);

    arr.inflate(2).unwrap();
    assert_eq!(arr, original);
}

#[test]
fn deep_reshape_roundtrip_leaves_data_untouched() {
    let mut arr = Array::alloc(24, DType::F64).unwrap();
    for i in 0..24u32 {
        arr.set_f64(&[i], i as f64).unwrap();
    }
    let flat_bytes = arr.as_bytes().to_vec();

    arr.inflate(2).unwrap();
    arr.inflate(3).unwrap();
    arr.inflate(2).unwrap();
    assert_eq!(arr.dims(), &[2, 3, 2, 2]);
    assert_eq!(arr.num_elements(), 24);
    assert_eq!(arr.as_bytes(), flat_bytes.as_slice());

    arr.flatten();
    assert_eq!(arr.dims(), &[24]);
    assert_eq!(arr.as_bytes(), flat_bytes.as_slice());
}

#[test]
fn reshape_failure_leaves_dims_intact() {
    let mut arr = Array::alloc(12, DType::U8).unwrap();
    arr.inflate(3).unwrap();

    assert!(arr.inflate(3).is_err()); // 4 % 3 != 0
    assert_eq!(arr.dims(), &[3, 4]);

    arr.inflate(2).unwrap();
    arr.inflate(2).unwrap();
    assert_eq!(arr.rank(), MAX_DIMS);
    assert!(arr.inflate(1).is_err());
    assert_eq!(arr.dims(), &[3, 2, 2, 1]);
}

// =============================================================================
// Binary codec round-trips
// =============================================================================

#[test]
fn serialization_roundtrip_little_endian() {
    let m = Array::matrix(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let bytes = writer::to_bytes(Endianness::Little, &m).unwrap();

    // Header: rank 2, F64 tag, trailing zero half.
    assert_eq!(&bytes[..4], &[2, 0x04, 0, 0]);
    assert_eq!(&bytes[4..8], &2u32.to_le_bytes());
    assert_eq!(&bytes[8..12], &3u32.to_le_bytes());

    let back = parser::from_bytes(&bytes).unwrap();
    assert_eq!(back.dims(), &[2, 3]);
    assert_eq!(back.dtype(), DType::F64);
    assert_eq!(back, m);

    // Writing the parsed array again is byte-identical.
    let again = writer::to_bytes(Endianness::Little, &back).unwrap();
    assert_eq!(again, bytes);
}

#[test]
fn serialization_roundtrip_big_endian() {
    let m = Array::matrix(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let bytes = writer::to_bytes(Endianness::Big, &m).unwrap();

    assert_eq!(&bytes[..4], &[0, 0, 0x04, 2]);
    assert_eq!(&bytes[4..8], &2u32.to_be_bytes());

    let back = parser::from_bytes(&bytes).unwrap();
    assert_eq!(back, m);
}

#[test]
fn roundtrip_i32_and_f32_payloads() {
    let values: Vec<i32> = vec![1, -2, 0x0A0B0C0D];
    let data: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
    let ints = Array::from_parts(DType::I32, vec![3], data).unwrap();

    for endianness in [Endianness::Little, Endianness::Big] {
        let bytes = writer::to_bytes(endianness, &ints).unwrap();
        let back = parser::from_bytes(&bytes).unwrap();
        assert_eq!(back, ints);
    }

    let values: Vec<f32> = vec![1.5, -0.25, 3.25e7];
    let data: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
    let floats = Array::from_parts(DType::F32, vec![3], data).unwrap();

    for endianness in [Endianness::Little, Endianness::Big] {
        let bytes = writer::to_bytes(endianness, &floats).unwrap();
        let back = parser::from_bytes(&bytes).unwrap();
        assert_eq!(back, floats);
    }
}

#[test]
fn u8_payload_identical_across_orders() {
    let data = vec![0xDE, 0xAD, 0xBE, 0xEF];
    let arr = Array::from_parts(DType::U8, vec![4], data.clone()).unwrap();

    let le = writer::to_bytes(Endianness::Little, &arr).unwrap();
    let be = writer::to_bytes(Endianness::Big, &arr).unwrap();
    assert_eq!(&le[le.len() - 4..], data.as_slice());
    assert_eq!(&be[be.len() - 4..], data.as_slice());
}

#[test]
fn rank_3_roundtrip() {
    let mut arr = Array::alloc(8, DType::F64).unwrap();
    for i in 0..8u32 {
        arr.set_f64(&[i], (i * i) as f64).unwrap();
    }
    arr.inflate(2).unwrap();
    arr.inflate(2).unwrap();

    for endianness in [Endianness::Little, Endianness::Big] {
        let bytes = writer::to_bytes(endianness, &arr).unwrap();
        let back = parser::from_bytes(&bytes).unwrap();
        assert_eq!(back, arr);
    }
}

// =============================================================================
// Codec error handling
// =============================================================================

#[test]
fn nonzero_magic_is_a_format_error() {
    let err = parser::from_bytes(&[0x11, 0x22, 0x33, 0x44]).unwrap_err();
    assert!(matches!(err, NdbinError::Format { .. }));
}

#[test]
fn rank_overflow_is_a_dimension_error() {
    // Big-endian magic: F64, rank 9.
    let err = parser::from_bytes(&[0, 0, 0x04, 9]).unwrap_err();
    assert!(matches!(err, NdbinError::Dimension { .. }));
}

#[test]
fn short_stream_is_an_io_error() {
    let m = Array::matrix(2, 3, &[0.5; 6]).unwrap();
    let bytes = writer::to_bytes(Endianness::Little, &m).unwrap();

    // Truncate inside the dimension vector, then inside the payload.
    for cut in [6, bytes.len() - 5] {
        let err = parser::from_bytes(&bytes[..cut]).unwrap_err();
        assert!(matches!(err, NdbinError::Io(_)), "cut at {cut}: {err}");
    }
}

#[test]
fn empty_stream_is_an_io_error() {
    let err = parser::from_bytes(&[]).unwrap_err();
    assert!(matches!(err, NdbinError::Io(_)));
}

// =============================================================================
// Elementwise apply
// =============================================================================

#[test]
fn apply_chains_transforms() {
    let mut m = Array::matrix(1, 4, &[1.0, 2.0, 3.0, 4.0]).unwrap();
    m.apply(transforms::square).unwrap();
    m.apply(|x| *x += 1.0).unwrap();
    assert_eq!(m.to_f64_vec().unwrap(), vec![2.0, 5.0, 10.0, 17.0]);
}

#[test]
fn apply_logistic_is_bounded() {
    let mut m = Array::matrix(1, 3, &[-10.0, 0.0, 10.0]).unwrap();
    m.apply(transforms::logistic).unwrap();
    for x in m.to_f64_vec().unwrap() {
        assert!(x > 0.0 && x < 1.0);
    }
}

#[test]
fn apply_random_fill_stays_in_range() {
    let mut m = Array::matrix(8, 8, &[0.0; 64]).unwrap();
    m.apply(transforms::random03).unwrap();
    for x in m.to_f64_vec().unwrap() {
        assert!((0.0..3.0).contains(&x));
    }
}

// =============================================================================
// Algebra layer
// =============================================================================

#[test]
fn cross_matches_hand_computation() {
    let a = Array::matrix(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let b = Array::matrix(3, 2, &[7.0, 8.0, 9.0, 10.0, 11.0, 12.0]).unwrap();
    let c = matrix::cross(&a, &b).unwrap();
    assert_eq!(c.dims(), &[2, 2]);
    assert_eq!(c.to_f64_vec().unwrap(), vec![58.0, 64.0, 139.0, 154.0]);
}

#[test]
fn cross_of_identity_like_with_its_transpose() {
    let a = Array::matrix(2, 3, &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0]).unwrap();
    let t = matrix::transpose(&a).unwrap();
    let c = matrix::cross(&a, &t).unwrap();
    assert_eq!(c.to_f64_vec().unwrap(), vec![1.0, 0.0, 0.0, 1.0]);
}

#[test]
fn transpose_twice_is_identity() {
    let a = Array::matrix(3, 4, &(0..12).map(f64::from).collect::<Vec<_>>()).unwrap();
    let back = matrix::transpose(&matrix::transpose(&a).unwrap()).unwrap();
    assert_eq!(back, a);
}

#[test]
fn sum_columns_of_all_ones() {
    let a = Array::matrix(5, 3, &[1.0; 15]).unwrap();
    let c = matrix::sum_columns(&a).unwrap();
    assert_eq!(c.dims(), &[1, 3]);
    assert_eq!(c.to_f64_vec().unwrap(), vec![5.0, 5.0, 5.0]);
}

#[test]
fn one_hot_example() {
    let mut v = Array::alloc(3, DType::U8).unwrap();
    v.inflate(1).unwrap();
    for (i, class) in [0u8, 3, 9].into_iter().enumerate() {
        v.set_u8(&[0, i as u32], class).unwrap();
    }

    let c = matrix::one_hot(&v).unwrap();
    assert_eq!(c.dims(), &[3, 10]);
    for (i, class) in [0u32, 3, 9].into_iter().enumerate() {
        for j in 0..10u32 {
            let expected = if j == class { 1.0 } else { 0.0 };
            assert_eq!(c.get_f64(&[i as u32, j]).unwrap(), expected);
        }
    }
}

#[test]
fn shape_mismatches_report_shape_errors() {
    let a = Array::matrix(2, 3, &[0.0; 6]).unwrap();
    let b = Array::matrix(3, 3, &[0.0; 9]).unwrap();
    let v = Array::vector(&[0.0; 2]).unwrap();

    assert!(matches!(
        matrix::cross(&b, &a),
        Err(NdbinError::Shape { .. })
    ));
    assert!(matches!(
        matrix::combine(&a, &b, matrix::add),
        Err(NdbinError::Shape { .. })
    ));
    assert!(matches!(
        matrix::combine_vector(&a, &v, matrix::mul),
        Err(NdbinError::Shape { .. })
    ));
}

#[test]
fn algebra_rejects_non_f64_operands() {
    let mut ints = Array::alloc(6, DType::I32).unwrap();
    ints.inflate(2).unwrap();
    assert!(matrix::sum(&ints).is_err());
    assert!(matrix::transpose(&ints).is_err());
}

#[test]
fn extract_slice_from_rank_3() {
    let mut arr = Array::alloc(12, DType::F64).unwrap();
    for i in 0..12u32 {
        arr.set_f64(&[i], i as f64).unwrap();
    }
    arr.inflate(2).unwrap();
    arr.inflate(3).unwrap();
    assert_eq!(arr.dims(), &[2, 3, 2]);

    let slice = matrix::extract_slice(&arr, 1).unwrap();
    assert_eq!(slice.dims(), &[3, 2]);
    assert_eq!(
        slice.to_f64_vec().unwrap(),
        vec![6.0, 7.0, 8.0, 9.0, 10.0, 11.0]
    );
    assert!(slice.is_matrix());
}

// =============================================================================
// Pipelines across layers
// =============================================================================

#[test]
fn algebra_on_deserialized_arrays() {
    let a = Array::matrix(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
    let bytes = writer::to_bytes(Endianness::Big, &a).unwrap();
    let parsed = parser::from_bytes(&bytes).unwrap();

    let mut squared = parsed.clone();
    squared.apply(transforms::square).unwrap();
    let total = matrix::sum(&squared).unwrap();
    assert_eq!(total, 30.0);

    let doubled = matrix::combine_scalar(2.0, &parsed, matrix::mul).unwrap();
    assert_eq!(doubled.to_f64_vec().unwrap(), vec![2.0, 4.0, 6.0, 8.0]);
}

#[test]
fn one_hot_of_deserialized_labels() {
    let labels = Array::from_parts(DType::U8, vec![1, 4], vec![2, 0, 1, 3]).unwrap();
    let bytes = writer::to_bytes(Endianness::Little, &labels).unwrap();
    let parsed = parser::from_bytes(&bytes).unwrap();

    let encoded = matrix::one_hot(&parsed).unwrap();
    assert_eq!(encoded.dims(), &[4, 10]);
    assert_eq!(matrix::sum(&encoded).unwrap(), 4.0);
}
