use crate::{
    dct::NUM_DCT_SIGNALS,
    plane::{ColorFrame, Plane},
};
use tables::QuantizationTable;
use zigzag::{unzigzag, zigzag};

pub mod tables;
pub mod zigzag;

pub fn quantize(amplitudes: &Plane<f64>, quantization_table: &QuantizationTable) -> Plane<i8> {
    Plane::from_fn(amplitudes.width(), amplitudes.height(), |x, y| {
        let step = quantization_table[y % NUM_DCT_SIGNALS][x % NUM_DCT_SIGNALS];
        let quantized = (amplitudes.get(x, y) / step).round_ties_even();

        quantized.clamp(i8::MIN as f64, i8::MAX as f64) as i8
    })
}

pub fn dequantize(quantized: &Plane<i8>, quantization_table: &QuantizationTable) -> Plane<f64> {
    Plane::from_fn(quantized.width(), quantized.height(), |x, y| {
        quantized.get(x, y) as f64 * quantization_table[y % NUM_DCT_SIGNALS][x % NUM_DCT_SIGNALS]
    })
}

pub fn quantize_and_zigzag(
    amplitudes: &ColorFrame<f64>,
    quantization_table: &QuantizationTable,
) -> ColorFrame<i8> {
    amplitudes.map_planes(|plane| zigzag(&quantize(plane, quantization_table)))
}

pub fn unzigzag_and_dequantize(
    quantized: &ColorFrame<i8>,
    quantization_table: &QuantizationTable,
) -> ColorFrame<f64> {
    quantized.map_planes(|plane| dequantize(&unzigzag(plane), quantization_table))
}
