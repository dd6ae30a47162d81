use twox_hash::XxHash32;

pub fn calculate_32(data: &[u8]) -> u32 {
    XxHash32::oneshot(0, data)
}

#[cfg(test)]
mod tests {
    #[test]
    fn given_same_input_calculate_should_produce_same_output() {
        let input = "hello world".as_bytes();
        let output1 = super::calculate_32(input);
        let output2 = super::calculate_32(input);
        assert_eq!(output1, output2);
    }
}
