//! End-to-end integration tests
//!
//! These tests run the fixed scenario through the public API exactly as the
//! CLI does:
//! 1. Build a strategy from a strategy type and driver config
//! 2. Run the fixed scenario
//! 3. Write the final balances to a temporary file
//! 4. Compare with the expected output under tests/fixtures/
//!
//! Every combination of strategy and output format is checked.

#[cfg(test)]
mod tests {
    use concurrent_ledger::cli::StrategyType;
    use concurrent_ledger::io::OutputFormat;
    use concurrent_ledger::strategy::{create_strategy, DriverConfig};
    use concurrent_ledger::Scenario;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::fs;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    /// Run the fixed scenario and compare the written balances with a fixture
    ///
    /// # Panics
    ///
    /// Panics if the fixture cannot be read, the run fails, or the output
    /// doesn't match.
    fn run_fixture(fixture_file: &str, format: OutputFormat, strategy_type: StrategyType) {
        let expected_path = format!("tests/fixtures/fixed_scenario/{}", fixture_file);
        let expected_output = fs::read_to_string(&expected_path)
            .unwrap_or_else(|e| panic!("Failed to read expected file {}: {}", expected_path, e));

        let strategy = create_strategy(strategy_type.clone(), DriverConfig::new(Duration::ZERO, 4));
        let mut temp_output = NamedTempFile::new().expect("Failed to create temp file");

        let report = strategy
            .process(&Scenario::default(), format, &mut temp_output)
            .unwrap_or_else(|e| panic!("Failed to run scenario: {}", e));
        temp_output.flush().expect("Failed to flush temp file");

        let actual_output = fs::read_to_string(temp_output.path())
            .unwrap_or_else(|e| panic!("Failed to read temp output file: {}", e));

        assert_eq!(
            actual_output, expected_output,
            "\n\nOutput mismatch for {} (strategy: {:?})\n\nActual output:\n{}\n\nExpected output:\n{}\n",
            fixture_file, strategy_type, actual_output, expected_output
        );
        assert_eq!(report.rejected, 0);
    }

    #[rstest]
    #[case::text("expected.txt", OutputFormat::Text)]
    #[case::csv("expected.csv", OutputFormat::Csv)]
    fn test_fixed_scenario(
        #[case] fixture_file: &str,
        #[case] format: OutputFormat,
        #[values(StrategyType::Sequential, StrategyType::Concurrent)] strategy: StrategyType,
    ) {
        run_fixture(fixture_file, format, strategy);
    }

    #[test]
    fn test_transfers_are_zero_sum_over_the_fixed_scenario() {
        let scenario = Scenario::default();
        let initial_total: Decimal = scenario.initial_balances().iter().copied().sum();
        let external: Decimal = scenario.requests().iter().map(|r| r.external_flow()).sum();

        let report = create_strategy(StrategyType::Concurrent, DriverConfig::new(Duration::ZERO, 4))
            .run(&scenario)
            .unwrap();

        // Every operation succeeds, so the whole external flow is applied
        assert_eq!(report.net_flow, external);
        assert_eq!(report.store.total(), initial_total + external);
    }
}
