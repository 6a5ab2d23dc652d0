// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

#[cfg(test)]
mod tests {
    use pricetrack::infrastructure::metrics;
    use pricetrack::utils::telemetry;

    #[test]
    fn test_telemetry_initialization_is_repeatable() {
        telemetry::init_telemetry();
        telemetry::init_telemetry();

        tracing::info!(
            url = "https://shop.example/p/1",
            vendor = "Shop",
            product_id = 42,
            "Scraping vendor page"
        );
    }

    #[test]
    fn test_metrics_recorder_installs_once() {
        let first = metrics::init_metrics();
        let second = metrics::init_metrics();

        // Only one global recorder can exist per process
        assert!(first.is_none() || second.is_none());
    }
}
