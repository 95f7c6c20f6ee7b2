mod random;
mod solver;
