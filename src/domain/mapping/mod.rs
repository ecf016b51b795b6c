//! # Mapping Tables
//!
//! Static, provider-specific translations of normalized codes into the
//! codes each partner API expects.
//!
//! Every table is a total `const fn` over its normalized domain returning
//! `None` when the provider has no equivalent. A `None` period means the
//! provider is ineligible for that period; a `None` anywhere else surfaces
//! as [`MappingUnsupported`](crate::domain::errors::MappingUnsupported) from
//! the provider's request builder.
//!
//! Eligibility is a pure function of `(period, vehicle class)`, so the set
//! of providers dispatched for the same inputs never varies between calls.

pub mod apex;
pub mod euroasia;
pub mod gross;
pub mod neo;
pub mod trust;

use crate::domain::value_objects::{PeriodCode, ProviderName, VehicleClass};
use std::collections::BTreeSet;

/// Returns true if the provider's table covers the vehicle class.
#[must_use]
pub const fn supports_vehicle_class(provider: ProviderName, class: VehicleClass) -> bool {
    match provider {
        ProviderName::Neo => neo::vehicle_type_id(class).is_some(),
        ProviderName::Gross => gross::vehicle_category(class).is_some(),
        ProviderName::Euroasia => euroasia::vehicle_kind_id(class).is_some(),
        ProviderName::Apex => apex::vehicle_type_id(class).is_some(),
        ProviderName::Trust => trust::vehicle_type_id(class).is_some(),
    }
}

/// Returns true if the provider can quote the period for the vehicle class.
///
/// An unknown vehicle class is never eligible.
#[must_use]
pub fn is_eligible(
    provider: ProviderName,
    period: PeriodCode,
    class: Option<VehicleClass>,
) -> bool {
    provider.supports_period(period)
        && class.is_some_and(|class| supports_vehicle_class(provider, class))
}

/// Providers able to quote the period for the vehicle class.
///
/// # Examples
///
/// ```
/// use osago_quotes::domain::mapping::eligible_providers;
/// use osago_quotes::domain::value_objects::{PeriodCode, ProviderName, VehicleClass};
///
/// let eligible = eligible_providers(PeriodCode::TwoMonths, Some(VehicleClass::PassengerCar));
/// assert_eq!(eligible.into_iter().collect::<Vec<_>>(), vec![ProviderName::Trust]);
/// ```
#[must_use]
pub fn eligible_providers(
    period: PeriodCode,
    class: Option<VehicleClass>,
) -> BTreeSet<ProviderName> {
    ProviderName::ALL
        .into_iter()
        .filter(|provider| is_eligible(*provider, period, class))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{DriverRestriction, UsageTerritory};

    fn period_is_mapped(provider: ProviderName, period: PeriodCode) -> bool {
        match provider {
            ProviderName::Neo => neo::period_id(period).is_some(),
            ProviderName::Gross => gross::term(period).is_some(),
            ProviderName::Euroasia => euroasia::period_id(period).is_some(),
            ProviderName::Apex => apex::term_months(period).is_some(),
            ProviderName::Trust => trust::period(period).is_some(),
        }
    }

    fn territory_is_mapped(provider: ProviderName, territory: UsageTerritory) -> bool {
        match provider {
            ProviderName::Neo => neo::territory_id(territory).is_some(),
            ProviderName::Gross => gross::region_code(territory).is_some(),
            ProviderName::Euroasia => euroasia::region_id(territory).is_some(),
            ProviderName::Apex => apex::zone_id(territory).is_some(),
            ProviderName::Trust => trust::territory_id(territory).is_some(),
        }
    }

    fn driver_is_mapped(provider: ProviderName, restriction: DriverRestriction) -> bool {
        match provider {
            ProviderName::Neo => neo::driver_limit_id(restriction).is_some(),
            ProviderName::Gross => gross::driver_mode(restriction).is_some(),
            ProviderName::Euroasia => euroasia::driver_limit_id(restriction).is_some(),
            ProviderName::Apex => apex::limited_drivers(restriction).is_some(),
            ProviderName::Trust => trust::driver_limit_id(restriction).is_some(),
        }
    }

    #[test]
    fn period_tables_agree_with_eligibility_rule() {
        for provider in ProviderName::ALL {
            for period in PeriodCode::ALL {
                assert_eq!(
                    period_is_mapped(provider, period),
                    provider.supports_period(period),
                    "{provider} / {period}"
                );
            }
        }
    }

    #[test]
    fn territory_tables_are_total() {
        for provider in ProviderName::ALL {
            for territory in UsageTerritory::ALL {
                assert!(territory_is_mapped(provider, territory), "{provider} / {territory}");
            }
        }
    }

    #[test]
    fn driver_tables_are_total() {
        for provider in ProviderName::ALL {
            for restriction in DriverRestriction::ALL {
                assert!(driver_is_mapped(provider, restriction), "{provider} / {restriction}");
            }
        }
    }

    #[test]
    fn vehicle_tables_cover_all_but_documented_gaps() {
        for provider in ProviderName::ALL {
            for class in VehicleClass::ALL {
                let expected = !matches!(
                    (provider, class),
                    (ProviderName::Gross, VehicleClass::TramTrolleybus)
                        | (ProviderName::Apex, VehicleClass::Motorcycle)
                );
                assert_eq!(
                    supports_vehicle_class(provider, class),
                    expected,
                    "{provider} / {class}"
                );
            }
        }
    }

    #[test]
    fn driver_codes_are_distinct_per_provider() {
        assert_ne!(
            neo::driver_limit_id(DriverRestriction::Limited),
            neo::driver_limit_id(DriverRestriction::Unrestricted)
        );
        assert_ne!(
            euroasia::driver_limit_id(DriverRestriction::Limited),
            euroasia::driver_limit_id(DriverRestriction::Unrestricted)
        );
        assert_ne!(
            trust::driver_limit_id(DriverRestriction::Limited),
            trust::driver_limit_id(DriverRestriction::Unrestricted)
        );
    }

    #[test]
    fn seasonal_cover_carries_seasonal_id() {
        let seasonal = trust::period(PeriodCode::TwoMonths);
        assert_eq!(
            seasonal,
            Some(trust::TrustPeriod {
                period_id: 4,
                seasonal_insurance_id: Some(2)
            })
        );
        assert!(
            trust::period(PeriodCode::OneYear).is_some_and(|p| p.seasonal_insurance_id.is_none())
        );
    }

    #[test]
    fn eligibility_for_a_passenger_car() {
        let class = Some(VehicleClass::PassengerCar);
        assert_eq!(eligible_providers(PeriodCode::OneYear, class).len(), 5);
        assert_eq!(
            eligible_providers(PeriodCode::TwentyDays, class),
            BTreeSet::from([ProviderName::Neo, ProviderName::Euroasia, ProviderName::Trust])
        );
        assert_eq!(
            eligible_providers(PeriodCode::TwoMonths, class),
            BTreeSet::from([ProviderName::Trust])
        );
    }

    #[test]
    fn eligibility_excludes_unmapped_vehicles() {
        let motorcycle = eligible_providers(PeriodCode::SixMonths, Some(VehicleClass::Motorcycle));
        assert!(!motorcycle.contains(&ProviderName::Apex));
        assert!(motorcycle.contains(&ProviderName::Gross));
        assert!(eligible_providers(PeriodCode::OneYear, None).is_empty());
    }

    #[test]
    fn eligibility_is_stable_across_calls() {
        for period in PeriodCode::ALL {
            for class in VehicleClass::ALL {
                assert_eq!(
                    eligible_providers(period, Some(class)),
                    eligible_providers(period, Some(class))
                );
            }
        }
    }
}
