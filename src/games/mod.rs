//! Game vocabulary.

pub mod tictactoe;
