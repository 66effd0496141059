pub mod tanh;
