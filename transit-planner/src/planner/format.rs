//! Human-readable route summaries.

use std::fmt;

use crate::domain::RoutePlan;

/// Render a plan as text.
///
/// A direct route is one sentence; otherwise a header line is followed by
/// one line per transfer, in path order.
pub fn render(plan: &RoutePlan) -> String {
    plan.to_string()
}

impl fmt::Display for RoutePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.estimated_minutes();
        if self.is_direct() {
            return write!(
                f,
                "From {} to {} (~{} min) - direct line",
                self.origin, self.destination, minutes
            );
        }

        write!(
            f,
            "From {} to {} (~{} min):",
            self.origin, self.destination, minutes
        )?;
        for transfer in &self.transfers {
            write!(
                f,
                "\n  • Change at {}: {} → {}",
                transfer.station, transfer.from_line, transfer.to_line
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Profile, Transfer};

    #[test]
    fn direct_route() {
        let plan = RoutePlan {
            origin: "Luz".into(),
            destination: "Sé".into(),
            profile: Profile::Fast,
            path: vec!["Luz".into(), "São Bento".into(), "Sé".into()],
            estimated_cost: 6,
            transfers: Vec::new(),
        };
        assert_eq!(render(&plan), "From Luz to Sé (~6 min) - direct line");
    }

    #[test]
    fn route_with_transfers() {
        let plan = RoutePlan {
            origin: "A".into(),
            destination: "E".into(),
            profile: Profile::Fast,
            path: ["A", "B", "C", "D", "E"].map(String::from).to_vec(),
            estimated_cost: 12,
            transfers: vec![Transfer {
                station: "C".into(),
                from_line: "L1".into(),
                to_line: "L2".into(),
            }],
        };
        assert_eq!(
            render(&plan),
            "From A to E (~12 min):\n  • Change at C: L1 → L2"
        );
    }

    #[test]
    fn stationary_route() {
        let plan = RoutePlan::stationary("Luz", Profile::Fast);
        assert_eq!(render(&plan), "From Luz to Luz (~0 min) - direct line");
    }
}
