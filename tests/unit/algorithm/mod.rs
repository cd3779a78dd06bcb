mod assembler;
mod bitset;
mod index;
