//! Property tests over the plate, the lessons and the resolver.

use std::collections::HashSet;

use proptest::prelude::*;

use liuren::{Branch, FourLessons, Guardian, HeavenEarthPlate, Lower, Pillar, ThreeTransmissions};

fn branch() -> impl Strategy<Value = Branch> {
    (0usize..12).prop_map(Branch::from_index)
}

fn pillar() -> impl Strategy<Value = Pillar> {
    (0usize..60).prop_map(Pillar::from_index)
}

proptest! {
    /// Heaven plate and guardian ring each use every branch exactly once.
    #[test]
    fn prop_plate_is_a_bijection(mg in branch(), day in pillar(), is_day in any::<bool>()) {
        let plate = HeavenEarthPlate::new(mg, day.stem(), is_day);
        let heaven: HashSet<Branch> = plate.heaven().iter().copied().collect();
        let ring: HashSet<Branch> = plate.guardians().iter().copied().collect();
        prop_assert_eq!(heaven.len(), 12);
        prop_assert_eq!(ring.len(), 12);
        prop_assert_eq!(plate.heaven()[0], mg);
        prop_assert_eq!(plate.guardians()[0], plate.noble());
    }

    /// `guardian_at` inverts the guardian ring.
    #[test]
    fn prop_guardian_at_inverts_ring(mg in branch(), day in pillar(), is_day in any::<bool>()) {
        let plate = HeavenEarthPlate::new(mg, day.stem(), is_day);
        for (i, &seat) in plate.guardians().iter().enumerate() {
            prop_assert_eq!(plate.guardian_at(seat), Guardian::ALL[i]);
        }
    }

    /// Lessons climb the plate: every upper sits above its lower's seat, and
    /// lessons two and four stand on the uppers of one and three.
    #[test]
    fn prop_lessons_follow_the_plate(mg in branch(), day in pillar()) {
        let plate = HeavenEarthPlate::new(mg, day.stem(), true);
        let lessons = FourLessons::assemble(&plate, day);
        for l in lessons.all() {
            prop_assert_eq!(l.upper, plate.ascend(l.seat()));
        }
        prop_assert_eq!(lessons.first().lower, Lower::Stem(day.stem()));
        prop_assert_eq!(lessons.second().lower, Lower::Branch(lessons.first().upper));
        prop_assert_eq!(lessons.third().lower, Lower::Branch(day.branch()));
        prop_assert_eq!(lessons.fourth().lower, Lower::Branch(lessons.third().upper));
        let distinct = lessons.distinct().len();
        prop_assert!((1..=4).contains(&distinct));
    }

    /// Resolving is a pure function of plate and lessons.
    #[test]
    fn prop_resolve_is_idempotent(mg in branch(), day in pillar(), is_day in any::<bool>()) {
        let plate = HeavenEarthPlate::new(mg, day.stem(), is_day);
        let lessons = FourLessons::assemble(&plate, day);
        let a = ThreeTransmissions::resolve(&plate, &lessons).unwrap();
        let b = ThreeTransmissions::resolve(&plate.clone(), &lessons.clone()).unwrap();
        prop_assert!(!a.patterns().is_empty());
        prop_assert!(a.trace().contains(&a.pattern().family()));
        prop_assert_eq!(a, b);
    }

    /// The day pillar advances one step per civil day.
    #[test]
    fn prop_day_pillar_steps_daily(offset in -100_000i64..100_000) {
        let anchor = chrono::NaiveDate::from_ymd_opt(1949, 10, 1).unwrap();
        let date = anchor + chrono::Duration::days(offset);
        let next = date + chrono::Duration::days(1);
        prop_assert_eq!(Pillar::for_date(next).index(), (Pillar::for_date(date).index() + 1) % 60);
        prop_assert_eq!(Pillar::for_date(date).index() as i64, offset.rem_euclid(60));
    }
}
