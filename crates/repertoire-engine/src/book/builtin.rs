use crate::core::Side;

pub(super) struct BuiltinLine {
    pub id: &'static str,
    pub name: &'static str,
    pub trainee: Side,
    pub moves: &'static [(&'static str, &'static [&'static str])],
}

pub(super) const BUILTIN_LINES: &[BuiltinLine] = &[
    BuiltinLine {
        id: "sicilianDragon",
        name: "Sicilian Defence - Accelerated Dragon",
        trainee: Side::Black,
        moves: &[
            ("", &["e2-e4"]),
            ("e2-e4", &["c7-c5"]),
            ("e2-e4,c7-c5", &["g1-f3"]),
            ("e2-e4,c7-c5,g1-f3", &["g7-g6"]),
            ("e2-e4,c7-c5,g1-f3,g7-g6", &["d2-d4"]),
            ("e2-e4,c7-c5,g1-f3,g7-g6,d2-d4", &["c5-d4"]),
            ("e2-e4,c7-c5,g1-f3,g7-g6,d2-d4,c5-d4", &["f3-d4"]),
            ("e2-e4,c7-c5,g1-f3,g7-g6,d2-d4,c5-d4,f3-d4", &["f8-g7"]),
            (
                "e2-e4,c7-c5,g1-f3,g7-g6,d2-d4,c5-d4,f3-d4,f8-g7",
                &["c2-c4", "b1-c3", "f2-f3"],
            ),
            (
                "e2-e4,c7-c5,g1-f3,g7-g6,d2-d4,c5-d4,f3-d4,f8-g7,c2-c4",
                &["b8-c6"],
            ),
            (
                "e2-e4,c7-c5,g1-f3,g7-g6,d2-d4,c5-d4,f3-d4,f8-g7,b1-c3",
                &["b8-c6"],
            ),
        ],
    },
    BuiltinLine {
        id: "scotchGame",
        name: "Scotch Game",
        trainee: Side::White,
        moves: &[
            ("", &["e2-e4"]),
            ("e2-e4", &["e7-e5"]),
            ("e2-e4,e7-e5", &["g1-f3"]),
            ("e2-e4,e7-e5,g1-f3", &["b8-c6"]),
            ("e2-e4,e7-e5,g1-f3,b8-c6", &["d2-d4"]),
            ("e2-e4,e7-e5,g1-f3,b8-c6,d2-d4", &["e5-d4"]),
            ("e2-e4,e7-e5,g1-f3,b8-c6,d2-d4,e5-d4", &["f3-d4"]),
            (
                "e2-e4,e7-e5,g1-f3,b8-c6,d2-d4,e5-d4,f3-d4",
                &["f8-c5", "g8-f6", "d8-h4"],
            ),
            (
                "e2-e4,e7-e5,g1-f3,b8-c6,d2-d4,e5-d4,f3-d4,f8-c5",
                &["d4-b5", "d4-c6"],
            ),
            (
                "e2-e4,e7-e5,g1-f3,b8-c6,d2-d4,e5-d4,f3-d4,g8-f6",
                &["d4-c6", "b1-c3"],
            ),
        ],
    },
    BuiltinLine {
        id: "scotchGambit",
        name: "Scotch Gambit",
        trainee: Side::White,
        moves: &[
            ("", &["e2-e4"]),
            ("e2-e4", &["e7-e5"]),
            ("e2-e4,e7-e5", &["g1-f3"]),
            ("e2-e4,e7-e5,g1-f3", &["b8-c6"]),
            ("e2-e4,e7-e5,g1-f3,b8-c6", &["d2-d4"]),
            ("e2-e4,e7-e5,g1-f3,b8-c6,d2-d4", &["e5-d4"]),
            ("e2-e4,e7-e5,g1-f3,b8-c6,d2-d4,e5-d4", &["f1-c4"]),
            (
                "e2-e4,e7-e5,g1-f3,b8-c6,d2-d4,e5-d4,f1-c4",
                &["f8-c5", "g8-f6", "f7-f5"],
            ),
            (
                "e2-e4,e7-e5,g1-f3,b8-c6,d2-d4,e5-d4,f1-c4,f8-c5",
                &["c2-c3", "e1-g1"],
            ),
            (
                "e2-e4,e7-e5,g1-f3,b8-c6,d2-d4,e5-d4,f1-c4,g8-f6",
                &["e4-e5", "c2-c3"],
            ),
        ],
    },
];
