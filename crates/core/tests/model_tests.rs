// ═══════════════════════════════════════════════════════════════════
// Model Tests: Category, Holding, Portfolio, BarbellPolicy, Snapshot,
// Mover, PercentChange, CategoryTotals, rounding
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;

use barbell_dashboard_core::errors::CoreError;
use barbell_dashboard_core::models::category::Category;
use barbell_dashboard_core::models::comparison::{Finding, FindingKind, FindingLevel, PercentChange};
use barbell_dashboard_core::models::holding::Holding;
use barbell_dashboard_core::models::policy::{AllocationTargets, BarbellPolicy};
use barbell_dashboard_core::models::portfolio::Portfolio;
use barbell_dashboard_core::models::snapshot::{Direction, Mover, Snapshot, TrendPoint};
use barbell_dashboard_core::models::summary::{CategoryTotals, ComplianceFlags};
use barbell_dashboard_core::rounding::{percent_of, round_keeping_sign, round_to};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ── Category ────────────────────────────────────────────────────────

mod category {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Category::Aggressive.to_string(), "Aggressive");
        assert_eq!(Category::Defensive.to_string(), "Defensive");
        assert_eq!(Category::Middle.to_string(), "Middle");
        assert_eq!(Category::Cash.to_string(), "Cash");
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("aggressive".parse::<Category>().unwrap(), Category::Aggressive);
        assert_eq!(" DEFENSIVE ".parse::<Category>().unwrap(), Category::Defensive);
        assert_eq!("Middle".parse::<Category>().unwrap(), Category::Middle);
        assert_eq!("cash".parse::<Category>().unwrap(), Category::Cash);
    }

    #[test]
    fn parse_unknown_is_invalid_input() {
        let err = "speculative".parse::<Category>().unwrap_err();
        match err {
            CoreError::InvalidInput(msg) => assert!(msg.contains("speculative")),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn serde_uses_lowercase() {
        let json = serde_json::to_string(&Category::Aggressive).unwrap();
        assert_eq!(json, "\"aggressive\"");
        let back: Category = serde_json::from_str("\"cash\"").unwrap();
        assert_eq!(back, Category::Cash);
    }

    #[test]
    fn serde_rejects_unknown() {
        assert!(serde_json::from_str::<Category>("\"other\"").is_err());
    }

    #[test]
    fn chart_order_puts_cash_before_middle() {
        assert_eq!(
            Category::CHART_ORDER,
            [
                Category::Aggressive,
                Category::Defensive,
                Category::Cash,
                Category::Middle
            ]
        );
    }
}

// ── Holding ─────────────────────────────────────────────────────────

mod holding {
    use super::*;

    #[test]
    fn new_uppercases_and_trims_symbol() {
        let h = Holding::new(" tech1 ", 125_000.0, Category::Aggressive);
        assert_eq!(h.symbol, "TECH1");
        assert!(!h.fixed);
        assert_eq!(h.shares, None);
        assert_eq!(h.gain_loss, None);
    }

    #[test]
    fn fixed_constructor_sets_flag() {
        let h = Holding::fixed("cash", 1_000_000.0, Category::Cash);
        assert!(h.fixed);
        assert_eq!(h.symbol, "CASH");
    }

    #[test]
    fn builders() {
        let h = Holding::new("GROWTH2", 106_000.0, Category::Aggressive)
            .with_shares(10.0)
            .with_gain_loss(32.6);
        assert_eq!(h.shares, Some(10.0));
        assert_eq!(h.gain_loss_or_zero(), 32.6);
    }

    #[test]
    fn absent_gain_loss_is_zero() {
        let h = Holding::new("BOND1", 200_000.0, Category::Defensive);
        assert_eq!(h.gain_loss_or_zero(), 0.0);
    }

    #[test]
    fn deserialize_with_defaults() {
        let h: Holding =
            serde_json::from_str(r#"{"symbol":"CASH","value":1000000,"category":"cash"}"#).unwrap();
        assert_eq!(h.value, 1_000_000.0);
        assert_eq!(h.shares, None);
        assert!(!h.fixed);
    }

    #[test]
    fn serialize_skips_absent_optionals() {
        let json = serde_json::to_string(&Holding::new("X", 1.0, Category::Middle)).unwrap();
        assert!(!json.contains("shares"));
        assert!(!json.contains("gain_loss"));
    }
}

// ── Portfolio ───────────────────────────────────────────────────────

mod portfolio {
    use super::*;

    #[test]
    fn add_holding_preserves_order() {
        let p = Portfolio::from_holdings(
            Some(d(2025, 5, 26)),
            vec![
                Holding::new("B", 1.0, Category::Defensive),
                Holding::new("A", 2.0, Category::Aggressive),
            ],
        )
        .unwrap();
        let symbols: Vec<&str> = p.holdings.iter().map(|h| h.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["B", "A"]);
        assert_eq!(p.analysis_date, Some(d(2025, 5, 26)));
    }

    #[test]
    fn duplicate_symbol_rejected() {
        let mut p = Portfolio::new(None);
        p.add_holding(Holding::new("TECH1", 1.0, Category::Aggressive))
            .unwrap();
        let err = p
            .add_holding(Holding::new("tech1", 2.0, Category::Middle))
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let p = Portfolio::from_holdings(None, vec![Holding::new("GOLD_ETF", 1.0, Category::Defensive)])
            .unwrap();
        assert!(p.contains("gold_etf"));
        assert_eq!(p.get("Gold_Etf").unwrap().value, 1.0);
        assert!(p.get("missing").is_none());
    }

    #[test]
    fn default_is_empty() {
        let p = Portfolio::default();
        assert!(p.is_empty());
        assert_eq!(p.analysis_date, None);
    }
}

// ── BarbellPolicy ───────────────────────────────────────────────────

mod policy {
    use super::*;

    #[test]
    fn defaults() {
        let p = BarbellPolicy::default();
        assert_eq!(p.aggressive_min, 0.08);
        assert_eq!(p.aggressive_max, 0.12);
        assert_eq!(p.defensive_min, 0.88);
        assert_eq!(p.cash_floor, 800_000.0);
        assert_eq!(p.middle_ceiling, 200_000.0);
        assert_eq!(p.display_targets, AllocationTargets::default());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn default_targets() {
        let t = AllocationTargets::default();
        assert_eq!(t.get(Category::Aggressive), 10.0);
        assert_eq!(t.get(Category::Defensive), 90.0);
        assert_eq!(t.get(Category::Cash), 50.0);
        assert_eq!(t.get(Category::Middle), 0.0);
    }

    #[test]
    fn aggressive_band_is_inclusive() {
        let p = BarbellPolicy::default();
        assert!(p.aggressive_in_band(0.08));
        assert!(p.aggressive_in_band(0.12));
        assert!(p.aggressive_in_band(0.10));
        assert!(!p.aggressive_in_band(0.0799));
        assert!(!p.aggressive_in_band(0.1201));
    }

    #[test]
    fn defensive_and_cash_thresholds() {
        let p = BarbellPolicy::default();
        assert!(p.defensive_sufficient(0.88));
        assert!(!p.defensive_sufficient(0.8799));
        assert!(p.cash_sufficient(800_000.0));
        assert!(!p.cash_sufficient(799_999.0));
        assert!(p.middle_reduced(199_999.0));
        assert!(!p.middle_reduced(200_000.0));
    }

    #[test]
    fn inverted_band_rejected() {
        let p = BarbellPolicy {
            aggressive_min: 0.2,
            aggressive_max: 0.1,
            ..BarbellPolicy::default()
        };
        assert!(matches!(p.validate(), Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn fraction_out_of_range_rejected() {
        let p = BarbellPolicy {
            defensive_min: 88.0,
            ..BarbellPolicy::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn negative_cash_floor_rejected() {
        let p = BarbellPolicy {
            cash_floor: -1.0,
            ..BarbellPolicy::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn target_above_hundred_rejected() {
        let p = BarbellPolicy {
            display_targets: AllocationTargets {
                defensive: 120.0,
                ..AllocationTargets::default()
            },
            ..BarbellPolicy::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn partial_json_takes_defaults() {
        let p: BarbellPolicy = serde_json::from_str(r#"{"cash_floor": 500000}"#).unwrap();
        assert_eq!(p.cash_floor, 500_000.0);
        assert_eq!(p.aggressive_min, 0.08);
        assert_eq!(p.display_targets.defensive, 90.0);
    }
}

// ── CategoryTotals & flags ──────────────────────────────────────────

mod totals {
    use super::*;

    #[test]
    fn add_and_total() {
        let mut t = CategoryTotals::default();
        t.add(Category::Aggressive, 125_000.0);
        t.add(Category::Defensive, 1_350_000.0);
        t.add(Category::Cash, 1_000_000.0);
        t.add(Category::Aggressive, 5_000.0);
        assert_eq!(t.get(Category::Aggressive), 130_000.0);
        assert_eq!(t.get(Category::Middle), 0.0);
        assert_eq!(t.total(), 2_480_000.0);
        assert_eq!(t.defensive_combined(), 2_350_000.0);
    }

    #[test]
    fn all_ok_ignores_middle() {
        let flags = ComplianceFlags {
            aggressive_ok: true,
            defensive_ok: true,
            cash_ok: true,
            middle_ok: false,
        };
        assert!(flags.all_ok());
        let failing = ComplianceFlags {
            cash_ok: false,
            ..flags
        };
        assert!(!failing.all_ok());
    }
}

// ── Snapshot, TrendPoint, Mover ─────────────────────────────────────

mod snapshot {
    use super::*;

    fn snap() -> Snapshot {
        Snapshot {
            date: d(2025, 4, 26),
            total_value: 1_850_000.0,
            aggressive: 285_000.0,
            defensive: 1_350_000.0,
            cash: 900_000.0,
            middle: 215_000.0,
        }
    }

    #[test]
    fn get_by_category() {
        let s = snap();
        assert_eq!(s.get(Category::Aggressive), 285_000.0);
        assert_eq!(s.get(Category::Defensive), 1_350_000.0);
        assert_eq!(s.get(Category::Cash), 900_000.0);
        assert_eq!(s.get(Category::Middle), 215_000.0);
    }

    #[test]
    fn trend_point_from_snapshot() {
        let p = TrendPoint::from(&snap());
        assert_eq!(p.label, "2025-04-26");
        assert_eq!(p.total, 1_850_000.0);
        assert_eq!(p.aggressive, 285_000.0);
    }

    #[test]
    fn snapshot_json_date_format() {
        let json = serde_json::to_string(&snap()).unwrap();
        assert!(json.contains("\"date\":\"2025-04-26\""));
    }

    #[test]
    fn trend_point_optional_fields_default() {
        let p: TrendPoint = serde_json::from_str(
            r#"{"label":"Jan","aggressive":250000,"defensive":1300000,"total":1750000}"#,
        )
        .unwrap();
        assert_eq!(p.cash, 0.0);
        assert_eq!(p.middle, 0.0);
    }

    #[test]
    fn direction_of_change() {
        assert_eq!(Direction::of_change(25.4), Direction::Up);
        assert_eq!(Direction::of_change(0.0), Direction::Up);
        assert_eq!(Direction::of_change(-8.5), Direction::Down);
    }

    #[test]
    fn mover_consistency() {
        assert!(Mover::new("TECH1", 25.4, Category::Aggressive, Direction::Up).is_consistent());
        assert!(Mover::new("CRYPTO3", -8.5, Category::Aggressive, Direction::Down).is_consistent());
        assert!(!Mover::new("X", -3.0, Category::Aggressive, Direction::Up).is_consistent());
        assert!(!Mover::new("Y", 0.0, Category::Middle, Direction::Down).is_consistent());
        assert!(!Mover::new("Z", f64::NAN, Category::Middle, Direction::Up).is_consistent());
    }

    #[test]
    fn mover_direction_serde() {
        let m: Mover = serde_json::from_str(
            r#"{"symbol":"BOND1","change":1.8,"category":"defensive","direction":"up"}"#,
        )
        .unwrap();
        assert_eq!(m.direction, Direction::Up);
        assert_eq!(m.category, Category::Defensive);
    }
}

// ── PercentChange & findings ────────────────────────────────────────

mod comparison_models {
    use super::*;

    #[test]
    fn percent_change_display() {
        assert_eq!(PercentChange::Defined(4.9).to_string(), "+4.9%");
        assert_eq!(PercentChange::Defined(-20.9).to_string(), "-20.9%");
        assert_eq!(PercentChange::Defined(0.0).to_string(), "0.0%");
        assert_eq!(PercentChange::Undefined.to_string(), "n/a");
    }

    #[test]
    fn percent_change_value() {
        assert_eq!(PercentChange::Defined(1.5).value(), Some(1.5));
        assert_eq!(PercentChange::Undefined.value(), None);
        assert!(!PercentChange::Undefined.is_defined());
    }

    #[test]
    fn zero_change_differs_from_undefined() {
        assert_ne!(PercentChange::Defined(0.0), PercentChange::Undefined);
        let json_zero = serde_json::to_string(&PercentChange::Defined(0.0)).unwrap();
        let json_undef = serde_json::to_string(&PercentChange::Undefined).unwrap();
        assert_ne!(json_zero, json_undef);
    }

    #[test]
    fn finding_serializes_flat() {
        let f = Finding::achievement(FindingKind::MiddleReduced { from: 11.6, to: 8.8 });
        let v: serde_json::Value = serde_json::to_value(f).unwrap();
        assert_eq!(v["level"], "achievement");
        assert_eq!(v["kind"], "middle_reduced");
        assert_eq!(v["from"], 11.6);
        let back: Finding = serde_json::from_value(v).unwrap();
        assert_eq!(back, f);
    }

    #[test]
    fn finding_constructors_set_level() {
        let c = Finding::concern(FindingKind::MiddleRemaining { share: 8.8 });
        assert_eq!(c.level, FindingLevel::Concern);
    }
}

// ── Rounding ────────────────────────────────────────────────────────

mod rounding {
    use super::*;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_to(4.25, 1), 4.3);
        assert_eq!(round_to(-4.25, 1), -4.3);
        assert_eq!(round_to(5.05050, 2), 5.05);
    }

    #[test]
    fn negative_zero_is_normalized() {
        let r = round_to(-0.01, 1);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }

    #[test]
    fn percent_of_example() {
        assert_eq!(percent_of(125_000.0, 2_475_000.0, 1), 5.1);
    }

    #[test]
    fn nonzero_value_never_rounds_to_zero() {
        assert_eq!(round_keeping_sign(0.01, 1), 0.1);
        assert_eq!(round_keeping_sign(-0.04, 1), -0.1);
        assert_eq!(round_keeping_sign(0.0004, 2), 0.01);
    }

    #[test]
    fn keeping_sign_matches_plain_rounding_otherwise() {
        assert_eq!(round_keeping_sign(0.0, 1), 0.0);
        assert_eq!(round_keeping_sign(4.25, 1), 4.3);
        assert_eq!(round_keeping_sign(-12.34, 1), -12.3);
    }
}
