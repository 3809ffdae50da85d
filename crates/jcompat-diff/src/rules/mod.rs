mod annotations;
mod generics;
mod members;
mod propagation;
mod types;
