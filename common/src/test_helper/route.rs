use crate::position::GeoPoint;

/// Start of the sample run, a street corner in Chennai.
pub fn get_start_point() -> GeoPoint {
    GeoPoint::new(80.2093, 13.0570)
}

/// Three points heading north-east from [`get_start_point`], roughly
/// 150 m apart.
pub fn get_route() -> Vec<GeoPoint> {
    vec![
        get_start_point(),
        GeoPoint::new(80.2103, 13.0580),
        GeoPoint::new(80.2113, 13.0590),
    ]
}

/// Same route as [`get_route`] as it appears in a positions CSV file.
pub fn get_route_as_csv<'a>() -> &'a str {
    "longitude,latitude\n80.2093,13.0570\n80.2103,13.0580\n80.2113,13.0590\n"
}
