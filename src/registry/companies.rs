//! Built-in company universe: (code, name, sector)

pub(super) const BUILTIN_COMPANIES: &[(&str, &str, &str)] = &[
    // Major miners
    ("BHP", "BHP Group Limited", "Diversified Metals"),
    ("RIO", "Rio Tinto Limited", "Diversified Metals"),
    ("FMG", "Fortescue Metals Group Ltd", "Iron Ore"),
    ("NCM", "Newcrest Mining Limited", "Gold"),
    ("EVN", "Evolution Mining Limited", "Gold"),
    ("NST", "Northern Star Resources Ltd", "Gold"),
    ("MIN", "Mineral Resources Limited", "Diversified Metals"),
    ("IGO", "IGO Limited", "Nickel/Lithium"),
    // Gold
    ("SBM", "St Barbara Limited", "Gold"),
    ("RSG", "Resolute Mining Limited", "Gold"),
    ("RRL", "Regis Resources Limited", "Gold"),
    ("SAR", "Saracen Mineral Holdings Limited", "Gold"),
    ("GOR", "Gold Road Resources Limited", "Gold"),
    ("DCN", "Dacian Gold Limited", "Gold"),
    ("KLA", "Kirkland Lake Gold Ltd", "Gold"),
    ("LRV", "Larvotto Resources Limited", "Gold"),
    ("TMR", "Tempus Resources Ltd", "Gold"),
    ("NVA", "Nova Minerals Limited", "Gold"),
    // Lithium and battery metals
    ("PLS", "Pilbara Minerals Limited", "Lithium"),
    ("ORE", "Orocobre Limited", "Lithium"),
    ("GXY", "Galaxy Resources Limited", "Lithium"),
    ("CXO", "Core Lithium Ltd", "Lithium"),
    ("LPD", "Lepidico Ltd", "Lithium"),
    ("ARI", "Argosy Minerals Limited", "Lithium"),
    ("ASN", "Anson Resources Limited", "Lithium"),
    ("LTR", "Liontown Resources Limited", "Lithium"),
    // Uranium
    ("BOE", "Boss Energy Limited", "Uranium"),
    ("PEN", "Peninsula Energy Limited", "Uranium"),
    ("BMN", "Bannerman Energy Ltd", "Uranium"),
    ("DYL", "Deep Yellow Limited", "Uranium"),
    ("LOT", "Lotus Resources Limited", "Uranium"),
    // Copper
    ("AZS", "Azure Minerals Limited", "Copper"),
    ("C6C", "Copper Mountain Mining Corporation", "Copper"),
    ("29M", "29Metals Limited", "Copper"),
    ("SFR", "Sandfire Resources Limited", "Copper"),
    // Iron ore
    ("GRR", "Grange Resources Limited", "Iron Ore"),
    ("AGO", "Atlas Iron Limited", "Iron Ore"),
    ("BCI", "BC Iron Limited", "Iron Ore"),
    ("FRI", "Fortescue Future Industries", "Iron Ore"),
    // Other metals
    ("MLS", "Metals X Limited", "Tin"),
    ("VMG", "VanMag Limited", "Vanadium"),
    ("FYI", "FYI Resources Limited", "Alumina"),
    ("SYR", "Syrah Resources Limited", "Graphite"),
    ("TNG", "TNG Limited", "Titanium"),
    // Rare earths
    ("LYC", "Lynas Rare Earths Ltd", "Rare Earths"),
    ("ARU", "Arafura Resources Limited", "Rare Earths"),
    ("IXR", "Ionic Rare Earths Limited", "Rare Earths"),
    // Coal
    ("WHC", "Whitehaven Coal Limited", "Coal"),
    ("NHC", "New Hope Corporation Limited", "Coal"),
    // Energy / oil & gas
    ("WDS", "Woodside Energy Group Ltd", "Energy"),
    ("STO", "Santos Limited", "Energy"),
    ("ORG", "Origin Energy Limited", "Energy"),
    ("EXR", "Elixir Energy Limited", "Gas"),
];
