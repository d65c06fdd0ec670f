//! The normal path: thief-conqueror through eight-special, with the
//! comparison and harm tie-breakers.

use crate::lessons::{dedup_by_seat, LessonPair};
use crate::model::{Branch, Element};

use super::{Candidate, Method, Pattern, Resolution, Resolver, Strike};

fn tag(lessons: Vec<LessonPair>, strike: Strike) -> Vec<Candidate> {
    lessons.into_iter().map(|lesson| Candidate { lesson, strike }).collect()
}

impl Resolver<'_> {
    /// Methods tried in order once neither chant applies. First success wins.
    pub(super) fn normal_path(&mut self) -> Resolution {
        let path: [fn(&mut Self) -> Resolution; 5] = [
            Self::thief_conqueror,
            Self::remote_overcome,
            Self::ang_star,
            Self::special_responsibility,
            Self::eight_special,
        ];
        for method in path {
            if let resolved @ Resolution::Resolved { .. } = method(self) {
                return resolved;
            }
        }
        Resolution::NotApplicable
    }

    // ------------------------------------------------------------------------
    // 3. Thief-Conqueror (贼克)
    // ------------------------------------------------------------------------

    pub(super) fn thief_conqueror(&mut self) -> Resolution {
        self.enter(Method::ThiefConqueror);
        let lessons = *self.lessons.all();

        let thieves = dedup_by_seat(lessons.iter().copied().filter(LessonPair::is_thief));
        match thieves.len() {
            0 => {}
            1 => return self.chained(thieves[0].upper, Pattern::DoubleReview),
            _ => return self.comparison_use(tag(thieves, Strike::Thief)),
        }

        let conquerors = dedup_by_seat(lessons.iter().copied().filter(LessonPair::is_conqueror));
        match conquerors.len() {
            0 => self.inapplicable(Method::ThiefConqueror, "no lesson strikes"),
            1 => self.chained(conquerors[0].upper, Pattern::Chief),
            _ => self.comparison_use(tag(conquerors, Strike::Conqueror)),
        }
    }

    // ------------------------------------------------------------------------
    // 4. Comparison-Use (比用)
    // ------------------------------------------------------------------------

    fn comparison_use(&mut self, candidates: Vec<Candidate>) -> Resolution {
        self.enter(Method::ComparisonUse);
        let day_polarity = self.lessons.first().lower.polarity();

        let matching: Vec<Candidate> = candidates
            .iter()
            .copied()
            .filter(|c| c.lesson.lower.polarity() == day_polarity)
            .collect();

        match matching.len() {
            1 => self.chained(matching[0].lesson.upper, Pattern::KnowOne),
            // None alike: fall back to every candidate, not to failure.
            0 => self.harm_involved(candidates),
            _ => self.harm_involved(matching),
        }
    }

    // ------------------------------------------------------------------------
    // 5. Harm-Involved (涉害)
    // ------------------------------------------------------------------------

    /// Overcome relations met walking from above the candidate back home.
    fn harm_depth(&self, candidate: &Candidate) -> usize {
        let home = candidate.lesson.upper;
        let own = candidate.lesson.lower.element();
        let strikes = |other: Element| match candidate.strike {
            Strike::Thief => other.overcomes(own),
            Strike::Conqueror => own.overcomes(other),
        };

        let mut depth = 0;
        let mut at = self.ascend(home);
        for _ in 0..12 {
            if at == home {
                break;
            }
            depth += usize::from(strikes(at.element()));
            depth += at.hidden_stems().iter().filter(|s| strikes(s.element())).count();
            at = at.succ();
        }
        depth
    }

    fn harm_involved(&mut self, candidates: Vec<Candidate>) -> Resolution {
        self.enter(Method::HarmInvolved);

        let depths: Vec<usize> = candidates.iter().map(|c| self.harm_depth(c)).collect();
        let deepest = depths.iter().copied().max().unwrap_or(0);
        let tied: Vec<Branch> = candidates
            .iter()
            .zip(&depths)
            .filter(|&(_, &d)| d == deepest)
            .map(|(c, _)| c.lesson.upper)
            .collect();
        tracing::trace!(?depths, deepest, "harm depths");

        if let [only] = tied[..] {
            return self.chained(only, Pattern::PerceiveHarm);
        }
        if let Some(&b) = tied.iter().find(|&&b| self.ascend(b).is_meng()) {
            return self.chained(b, Pattern::SeeOmen);
        }
        if let Some(&b) = tied.iter().find(|&&b| self.ascend(b).is_zhong()) {
            return self.chained(b, Pattern::SubtleWatch);
        }

        let initial = if self.lessons.is_yang_day() {
            self.lessons.stem_yang_god()
        } else {
            self.lessons.branch_yang_god()
        };
        self.chained(initial, Pattern::DuplicateRank)
    }

    // ------------------------------------------------------------------------
    // 6. Remote-Overcome (遥克)
    // ------------------------------------------------------------------------

    fn remote_overcome(&mut self) -> Resolution {
        self.enter(Method::RemoteOvercome);
        if self.lessons.day().is_eight_transmission_day() {
            return self.inapplicable(Method::RemoteOvercome, "eight-transmission day");
        }

        let day = self.lessons.first().lower.element();
        let lessons = *self.lessons.all();
        let others = &lessons[1..];

        let striking_day = dedup_by_seat(
            others.iter().copied().filter(|l| l.lower.element().overcomes(day)),
        );
        let candidates = if striking_day.is_empty() {
            let struck_by_day = dedup_by_seat(
                others.iter().copied().filter(|l| day.overcomes(l.lower.element())),
            );
            tag(struck_by_day, Strike::Conqueror)
        } else {
            tag(striking_day, Strike::Thief)
        };

        match candidates.len() {
            0 => self.inapplicable(Method::RemoteOvercome, "nothing overcomes across lessons"),
            1 => self.chained(candidates[0].lesson.upper, Pattern::RemoteOvercome),
            _ => {
                self.patterns.push(Pattern::RemoteOvercome);
                self.comparison_use(candidates)
            }
        }
    }

    // ------------------------------------------------------------------------
    // 7. Ang-Star (昂星)
    // ------------------------------------------------------------------------

    fn ang_star(&mut self) -> Resolution {
        self.enter(Method::AngStar);
        if self.lessons.distinct().len() != 4 {
            return self.inapplicable(Method::AngStar, "lessons repeat");
        }

        let initial = self.ascend(Branch::You);
        let stem_god = self.lessons.stem_yang_god();
        let branch_god = self.lessons.branch_yang_god();
        if self.lessons.is_yang_day() {
            Resolution::Resolved {
                branches: [initial, branch_god, stem_god],
                pattern: Pattern::TigerGaze,
            }
        } else {
            Resolution::Resolved {
                branches: [initial, stem_god, branch_god],
                pattern: Pattern::WinterSnake,
            }
        }
    }

    // ------------------------------------------------------------------------
    // 8. Special-Responsibility (别责)
    // ------------------------------------------------------------------------

    fn special_responsibility(&mut self) -> Resolution {
        self.enter(Method::SpecialResponsibility);
        if self.lessons.distinct().len() != 3 {
            return self.inapplicable(Method::SpecialResponsibility, "needs exactly three lessons");
        }

        let initial = if self.lessons.is_yang_day() {
            // 干合: the stem five places on.
            let partner = self.lessons.day().stem() + 5;
            self.ascend(partner.palace())
        } else {
            self.lessons.fourth().upper + 4
        };
        let god = self.lessons.stem_yang_god();
        Resolution::Resolved {
            branches: [initial, god, god],
            pattern: Pattern::SpecialResponsibility,
        }
    }

    // ------------------------------------------------------------------------
    // 9. Eight-Special (八专)
    // ------------------------------------------------------------------------

    fn eight_special(&mut self) -> Resolution {
        self.enter(Method::EightSpecial);
        if !self.lessons.day().is_eight_transmission_day() {
            return self.inapplicable(Method::EightSpecial, "not an eight-transmission day");
        }

        let god = self.lessons.stem_yang_god();
        let initial = if self.lessons.is_yang_day() {
            god + 2
        } else {
            self.lessons.fourth().upper.opposite() - 2
        };
        Resolution::Resolved {
            branches: [initial, god, god],
            pattern: Pattern::EightSpecial,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::lessons::FourLessons;
    use crate::model::{Branch, Pillar};
    use crate::plate::HeavenEarthPlate;
    use crate::transmission::{Method, Pattern, ThreeTransmissions};
    use Branch::*;

    fn resolve(moon_general: Branch, day: &str) -> ThreeTransmissions {
        let day: Pillar = day.parse().unwrap();
        let plate = HeavenEarthPlate::new(moon_general, day.stem(), true);
        let lessons = FourLessons::assemble(&plate, day);
        ThreeTransmissions::resolve(&plate, &lessons).unwrap()
    }

    #[test]
    fn test_single_conqueror_is_chief() {
        // 午/丙 未/午 卯/寅 辰/卯: only 卯 (wood) under 辰 (earth) strikes upward.
        let t = resolve(Chou, "丙寅");
        assert_eq!(t.branches(), [Chen, Si, Wu]);
        assert_eq!(t.patterns(), &[Pattern::Chief]);
        assert_eq!(t.trace(), &[Method::ThiefConqueror]);
    }

    #[test]
    fn test_comparison_picks_the_yang_thief() {
        // Thieves 丑/子 and 寅/丑; only 子 shares the day's yang polarity.
        let t = resolve(Chou, "甲子");
        assert_eq!(t.branches(), [Chou, Yin, Mao]);
        assert_eq!(t.patterns(), &[Pattern::KnowOne]);
        assert_eq!(t.trace(), &[Method::ThiefConqueror, Method::ComparisonUse]);
    }

    #[test]
    fn test_harm_depth_decides() {
        let t = resolve(Chou, "丁卯");
        assert_eq!(t.branches(), [Chen, Si, Wu]);
        assert_eq!(t.patterns(), &[Pattern::PerceiveHarm]);
        assert_eq!(
            t.trace(),
            &[Method::ThiefConqueror, Method::ComparisonUse, Method::HarmInvolved]
        );
    }

    #[test]
    fn test_harm_tie_broken_by_meng() {
        let t = resolve(Si, "乙亥");
        assert_eq!(t.branches(), [You, Yin, Wei]);
        assert_eq!(t.patterns(), &[Pattern::SeeOmen]);
    }

    #[test]
    fn test_harm_tie_broken_by_zhong() {
        let t = resolve(Chen, "辛未");
        assert_eq!(t.branches(), [Yin, Wu, Xu]);
        assert_eq!(t.patterns(), &[Pattern::SubtleWatch]);
    }

    #[test]
    fn test_harm_tie_falls_to_duplicate_rank() {
        // Yang day: the stem god 午 leads.
        let t = resolve(Wei, "壬申");
        assert_eq!(t.branches(), [Wu, Chou, Shen]);
        assert_eq!(t.patterns(), &[Pattern::DuplicateRank]);
    }

    #[test]
    fn test_single_remote_overcome() {
        // 酉/庚 戌/酉 未/午 申/未: nothing strikes within a lesson, but 午 (fire)
        // overcomes the day's metal from across the lessons.
        let t = resolve(Chou, "庚午");
        assert_eq!(t.branches(), [Wei, Shen, You]);
        assert_eq!(t.patterns(), &[Pattern::RemoteOvercome]);
        assert_eq!(t.trace(), &[Method::ThiefConqueror, Method::RemoteOvercome]);
    }

    #[test]
    fn test_several_remote_overcomes_reenter_comparison() {
        let t = resolve(Chou, "辛巳");
        assert_eq!(t.branches(), [Wu, Wei, Shen]);
        assert_eq!(t.patterns(), &[Pattern::RemoteOvercome, Pattern::KnowOne]);
        assert_eq!(
            t.trace(),
            &[Method::ThiefConqueror, Method::RemoteOvercome, Method::ComparisonUse]
        );
        assert_eq!(t.pattern(), Pattern::KnowOne);
    }

    #[test]
    fn test_ang_star_yang_day() {
        let t = resolve(Chou, "戊申");
        assert_eq!(t.branches(), [Xu, You, Wu]);
        assert_eq!(t.patterns(), &[Pattern::TigerGaze]);
        assert_eq!(
            t.trace(),
            &[Method::ThiefConqueror, Method::RemoteOvercome, Method::AngStar]
        );
    }

    #[test]
    fn test_ang_star_yin_day() {
        let t = resolve(Chou, "己巳");
        assert_eq!(t.branches(), [Xu, Shen, Wu]);
        assert_eq!(t.patterns(), &[Pattern::WinterSnake]);
    }

    #[test]
    fn test_special_responsibility_yang_day() {
        // 午/戊 未/午 巳/辰 午/巳: 午 repeats, three lessons remain.
        // 戊 combines with 癸, which lodges on 丑; 寅 sits above it.
        let t = resolve(Chou, "戊辰");
        assert_eq!(t.branches(), [Yin, Wu, Wu]);
        assert_eq!(t.patterns(), &[Pattern::SpecialResponsibility]);
    }

    #[test]
    fn test_special_responsibility_yin_day() {
        // Fourth lesson's upper 未, four on: 亥.
        let t = resolve(Chou, "乙巳");
        assert_eq!(t.branches(), [Hai, Si, Si]);
        assert_eq!(t.patterns(), &[Pattern::SpecialResponsibility]);
    }

    #[test]
    fn test_eight_special_yin_day() {
        // 己未: fourth lesson's upper 酉, its opposite 卯, back two: 丑.
        let t = resolve(Chou, "己未");
        assert_eq!(t.branches(), [Chou, Shen, Shen]);
        assert_eq!(t.patterns(), &[Pattern::EightSpecial]);
        assert_eq!(
            t.trace(),
            &[
                Method::ThiefConqueror,
                Method::RemoteOvercome,
                Method::AngStar,
                Method::SpecialResponsibility,
                Method::EightSpecial,
            ]
        );
    }

    #[test]
    fn test_eight_special_yang_day() {
        // 庚申: stem god 酉, two on: 亥.
        let t = resolve(Chou, "庚申");
        assert_eq!(t.branches(), [Hai, You, You]);
        assert_eq!(t.patterns(), &[Pattern::EightSpecial]);
    }

    #[test]
    fn test_reverse_chant_delegates_to_harm() {
        let t = resolve(Wu, "丙寅");
        assert_eq!(t.branches(), [Hai, Si, Hai]);
        assert_eq!(t.patterns(), &[Pattern::SeeOmen]);
        assert_eq!(
            t.trace(),
            &[
                Method::ReverseChant,
                Method::ThiefConqueror,
                Method::ComparisonUse,
                Method::HarmInvolved,
            ]
        );
    }

    #[test]
    fn test_every_chart_resolves() {
        for mg in Branch::ALL {
            for n in 0..60 {
                let day = Pillar::from_index(n);
                let plate = HeavenEarthPlate::new(mg, day.stem(), false);
                let lessons = FourLessons::assemble(&plate, day);
                let t = ThreeTransmissions::resolve(&plate, &lessons)
                    .unwrap_or_else(|e| panic!("{day} under {mg}: {e}"));
                let families: Vec<_> = t.patterns().iter().map(|p| p.family()).collect();
                assert!(!families.is_empty());
                assert!(t.trace().contains(&t.pattern().family()), "{day} under {mg}");
            }
        }
    }
}
