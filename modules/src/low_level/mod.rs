pub mod biquad_filter;
