//! Static chant (伏吟) and reverse chant (返吟): the two plate alignments
//! checked before the normal path.

use crate::model::{Branch, Stem};

use super::{ChantDay, Method, Pattern, Resolution, Resolver};

/// Punishment partner, or `fallback` when the branch punishes itself.
fn punish_or(branch: Branch, fallback: Branch) -> Branch {
    if branch.is_self_conflict() { fallback } else { branch.conflict_partner() }
}

/// Punishment partner, or the opposite branch on self-punishment.
fn punish_or_oppose(branch: Branch) -> Branch {
    punish_or(branch, branch.opposite())
}

impl Resolver<'_> {
    /// Heaven plate equals earth plate. Always resolves.
    pub(super) fn static_chant(&mut self) -> Resolution {
        self.enter(Method::StaticChant);

        let lessons = self.lessons;
        let stem_god = lessons.stem_yang_god();
        let branch_god = lessons.branch_yang_god();
        let yang = lessons.is_yang_day();

        let (branches, day) = match lessons.day().stem() {
            Stem::Gui => ([self.ascend(Branch::Chou), Branch::Xu, Branch::Wei], ChantDay::SixGui),
            Stem::Yi => {
                let middle = branch_god;
                ([Branch::Chen, middle, punish_or_oppose(middle)], ChantDay::SixYi)
            }
            _ if yang => {
                let middle = punish_or(stem_god, branch_god);
                ([stem_god, middle, punish_or_oppose(middle)], ChantDay::Firm)
            }
            _ => {
                let middle = punish_or(branch_god, stem_god);
                ([branch_god, middle, punish_or_oppose(middle)], ChantDay::Soft)
            }
        };

        let pattern = if yang { Pattern::SelfReliant(day) } else { Pattern::SelfTrust(day) };
        Resolution::Resolved { branches, pattern }
    }

    /// Heaven plate opposes earth plate. Thief-conqueror gets one try, then
    /// the traveling-horse rule.
    pub(super) fn reverse_chant(&mut self) -> Resolution {
        self.enter(Method::ReverseChant);

        if let resolved @ Resolution::Resolved { .. } = self.thief_conqueror() {
            return resolved;
        }

        // Step the fourth lesson's upper branch by four until it lands on a meng.
        let start = self.lessons.fourth().upper;
        let Some(horse) = (0..3).map(|k| start + 4 * k).find(|b| b.is_meng()) else {
            return self.inapplicable(Method::ReverseChant, "no meng within three hops");
        };

        Resolution::Resolved {
            branches: [
                horse.opposite(),
                self.lessons.branch_yang_god(),
                self.lessons.stem_yang_god(),
            ],
            pattern: Pattern::Unanchored,
        }
    }
}
