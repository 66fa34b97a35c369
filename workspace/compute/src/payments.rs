use std::collections::HashMap;

use common::converters::share;
use common::{PaymentDistribution, PaymentMethodShare};
use model::Dataset;
use rust_decimal::Decimal;
use tracing::instrument;

/// Counts payments per method, most used method first.
///
/// Ties are broken by method name ascending. Every payment row counts once,
/// so an order paid in several parts contributes several payments.
#[instrument(skip(dataset), fields(payments = dataset.payments.len()))]
pub fn payment_distribution(dataset: &Dataset) -> PaymentDistribution {
    let mut totals: HashMap<&str, (u64, Decimal)> = HashMap::new();
    for payment in &dataset.payments {
        let entry = totals
            .entry(payment.method.as_str())
            .or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += payment.value;
    }

    let total_payments = dataset.payments.len() as u64;

    let mut methods: Vec<PaymentMethodShare> = totals
        .into_iter()
        .map(|(method, (count, total_value))| PaymentMethodShare {
            method: method.to_string(),
            count,
            proportion: share(count, total_payments),
            total_value,
        })
        .collect();

    methods.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.method.cmp(&b.method)));

    PaymentDistribution {
        total_payments,
        methods,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{money, sample_dataset};

    #[test]
    fn test_payment_distribution() {
        let distribution = payment_distribution(&sample_dataset());

        assert_eq!(distribution.total_payments, 5);

        let methods: Vec<(&str, u64)> = distribution
            .methods
            .iter()
            .map(|m| (m.method.as_str(), m.count))
            .collect();
        assert_eq!(
            methods,
            vec![("credit_card", 3), ("boleto", 1), ("voucher", 1)]
        );

        let credit_card = &distribution.methods[0];
        assert_eq!(credit_card.total_value, money("450.00"));
        assert!((credit_card.proportion - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_counts_sum_to_total() {
        let distribution = payment_distribution(&sample_dataset());

        let sum: u64 = distribution.methods.iter().map(|m| m.count).sum();
        assert_eq!(sum, distribution.total_payments);

        let proportions: f64 = distribution.methods.iter().map(|m| m.proportion).sum();
        assert!((proportions - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_payments() {
        let distribution = payment_distribution(&Dataset::default());
        assert_eq!(distribution.total_payments, 0);
        assert!(distribution.methods.is_empty());
    }
}
