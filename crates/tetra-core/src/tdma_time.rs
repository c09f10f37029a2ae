use core::fmt;

/// TDMA timing triple per Clause 9: timeslot cycles fastest, then frame,
/// then multiframe. Frame 18 of each multiframe carries control signalling
/// on traffic carriers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TdmaTime {
    /// Timeslot, from 1 to 4
    pub t: u8,
    /// Frame number, from 1 to 18
    pub f: u8,
    /// Multiframe number, from 1 to 60
    pub m: u8,
}

impl Default for TdmaTime {
    fn default() -> TdmaTime {
        TdmaTime { t: 1, f: 1, m: 1 }
    }
}

impl TdmaTime {
    pub fn is_valid(self) -> bool {
        self.t >= 1 && self.t <= 4 &&
        self.f >= 1 && self.f <= 18 &&
        self.m >= 1 && self.m <= 60
    }

    /// Slot count since 1/1/1, for ordering and arithmetic.
    pub fn to_int(self) -> i32 {
        (self.t as i32 - 1) +
        ((self.f as i32 - 1) * 4) +
        ((self.m as i32 - 1) * 4 * 18)
    }

    pub fn from_int(time: i32) -> TdmaTime {
        let t = (time.rem_euclid(4) + 1) as u8;
        let f = (time.div_euclid(4).rem_euclid(18) + 1) as u8;
        let m = (time.div_euclid(4 * 18).rem_euclid(60) + 1) as u8;
        TdmaTime { t, f, m }
    }

    /// Advance by one timeslot: TN wraps 4 -> 1 carrying into FN, FN wraps
    /// 18 -> 1 carrying into MN, MN wraps 60 -> 1.
    pub fn next_slot(self) -> TdmaTime {
        let mut n = self;
        n.t += 1;
        if n.t > 4 {
            n.t = 1;
            n.f += 1;
            if n.f > 18 {
                n.f = 1;
                n.m += 1;
                if n.m > 60 {
                    n.m = 1;
                }
            }
        }
        n
    }

    pub fn add_timeslots(self, num_slots: i32) -> TdmaTime {
        TdmaTime::from_int((self.to_int() + num_slots).rem_euclid(4 * 18 * 60))
    }
}

impl fmt::Display for TdmaTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{}", self.m, self.f, self.t)
    }
}

impl fmt::Debug for TdmaTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{}", self.m, self.f, self.t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_slot_cycling() {
        // TN cycles fastest, FN carries on TN wrap, MN carries on FN wrap
        let t = TdmaTime { t: 4, f: 18, m: 60 };
        assert_eq!(t.next_slot(), TdmaTime { t: 1, f: 1, m: 1 });
        let t = TdmaTime { t: 4, f: 3, m: 7 };
        assert_eq!(t.next_slot(), TdmaTime { t: 1, f: 4, m: 7 });
        let t = TdmaTime { t: 2, f: 3, m: 7 };
        assert_eq!(t.next_slot(), TdmaTime { t: 3, f: 3, m: 7 });
    }

    #[test]
    fn test_monotone_modulo_wrap() {
        // stepping one slot at a time is strictly increasing in (MN, FN, TN)
        // lexicographic order, except at the multiframe wrap
        let mut t = TdmaTime::default();
        for _ in 0..(4 * 18 * 60 * 2) {
            let n = t.next_slot();
            assert!(n.is_valid());
            let cur = (t.m, t.f, t.t);
            let nxt = (n.m, n.f, n.t);
            if nxt <= cur {
                assert_eq!(cur, (60, 18, 4));
                assert_eq!(nxt, (1, 1, 1));
            }
            t = n;
        }
        assert_eq!(t, TdmaTime::default());
    }

    #[test]
    fn test_int_roundtrip() {
        assert_eq!(TdmaTime::from_int(0), TdmaTime::default());
        for time_int in 0..(4 * 18 * 60) {
            assert_eq!(TdmaTime::from_int(time_int).to_int(), time_int);
        }
        assert_eq!(TdmaTime::default().add_timeslots(-1), TdmaTime { t: 4, f: 18, m: 60 });
    }
}
