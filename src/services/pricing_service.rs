use serde::Serialize;

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummary {
    pub participants: u32,
    pub price_per_person: f64,
    pub total: f64,
    pub formatted_total: String,
}

pub struct PricingService;

impl PricingService {
    /// Total price for a group (price per person x participants)
    pub fn total_price(price_per_person: f64, participants: u32) -> f64 {
        price_per_person * participants as f64
    }

    /// Format an amount as rupiah with `.` thousands separators and no decimals, e.g. `Rp1.500.000`
    pub fn format_rupiah(amount: f64) -> String {
        let rounded = amount.round();
        let negative = rounded < 0.0;
        let digits = format!("{:.0}", rounded.abs());

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }

        if negative {
            format!("-Rp{}", grouped)
        } else {
            format!("Rp{}", grouped)
        }
    }

    pub fn summarize(price_per_person: f64, participants: u32) -> PriceSummary {
        let total = Self::total_price(price_per_person, participants);
        PriceSummary {
            participants,
            price_per_person,
            total,
            formatted_total: Self::format_rupiah(total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_price() {
        assert_eq!(PricingService::total_price(500_000.0, 3), 1_500_000.0);
        assert_eq!(PricingService::total_price(500_000.0, 0), 0.0);
    }

    #[test]
    fn test_format_rupiah() {
        assert_eq!(PricingService::format_rupiah(1_500_000.0), "Rp1.500.000");
        assert_eq!(PricingService::format_rupiah(0.0), "Rp0");
        assert_eq!(PricingService::format_rupiah(999.0), "Rp999");
        assert_eq!(PricingService::format_rupiah(1000.0), "Rp1.000");
        assert_eq!(PricingService::format_rupiah(12_345_678.4), "Rp12.345.678");
        assert_eq!(PricingService::format_rupiah(-2500.0), "-Rp2.500");
    }

    #[test]
    fn test_summarize() {
        let summary = PricingService::summarize(500_000.0, 3);
        assert_eq!(summary.total, 1_500_000.0);
        assert_eq!(summary.formatted_total, "Rp1.500.000");
    }
}
