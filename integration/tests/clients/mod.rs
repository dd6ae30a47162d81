mod consumer;
mod producer;
mod verifier;
