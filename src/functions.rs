//! Builtin function constructors.
//!
//! One constructor per registry entry, each validating its argument
//! count against the builtin's arity alternatives before the call node
//! exists. The table and the constructors are generated together from a
//! single listing so they cannot drift apart.
//!
//! ```
//! use aqb::{functions, ToAql};
//!
//! let call = functions::concat(vec!["a.firstName", "a.lastName"])?;
//! assert_eq!(call.to_aql(), "CONCAT(a.firstName, a.lastName)");
//! # Ok::<(), aqb::AqlError>(())
//! ```

use std::sync::LazyLock;

use crate::ast::Expr;
use crate::error::AqlError;
use crate::registry::Arity::{AtLeast, Between, Exactly};
use crate::registry::{Builtin, Registry};
use crate::value::AqlValue;

static DEFAULT_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

pub(crate) fn default_registry() -> &'static Registry {
    &DEFAULT_REGISTRY
}

macro_rules! builtins {
    ($($NAME:ident => $fname:ident, [$($arity:expr),+ $(,)?] $(, deprecated: $dep:literal)? ;)+) => {
        /// The builtin function table: name, arity alternatives,
        /// deprecation flag.
        pub static BUILTINS: &[Builtin] = &[
            $(Builtin {
                name: stringify!($NAME),
                arity: &[$($arity),+],
                deprecated: false $(|| $dep)?,
            }),+
        ];

        $(
            #[doc = concat!("Build a `", stringify!($NAME), "` call.")]
            pub fn $fname<I>(args: I) -> Result<Expr, AqlError>
            where
                I: IntoIterator,
                I::Item: Into<AqlValue>,
            {
                default_registry().call(
                    stringify!($NAME),
                    args.into_iter().map(Into::into).collect(),
                )
            }
        )+
    };
}

builtins! {
    // Conversion
    TO_BOOL => to_bool, [Exactly(1)];
    TO_NUMBER => to_number, [Exactly(1)];
    TO_STRING => to_string, [Exactly(1)];
    TO_LIST => to_list, [Exactly(1)];
    // Type checks
    IS_NULL => is_null, [Exactly(1)];
    IS_BOOL => is_bool, [Exactly(1)];
    IS_NUMBER => is_number, [Exactly(1)];
    IS_STRING => is_string, [Exactly(1)];
    IS_LIST => is_list, [Exactly(1)];
    IS_DOCUMENT => is_document, [Exactly(1)];
    // String functions
    CONCAT => concat, [AtLeast(1)];
    CONCAT_SEPARATOR => concat_separator, [AtLeast(2)];
    CHAR_LENGTH => char_length, [Exactly(1)];
    LENGTH => length, [Exactly(1)];
    LOWER => lower, [Exactly(1)];
    UPPER => upper, [Exactly(1)];
    SUBSTRING => substring, [Exactly(2), Exactly(3)];
    LEFT => left, [Exactly(2)];
    RIGHT => right, [Exactly(2)];
    TRIM => trim, [Exactly(1), Exactly(2)];
    REVERSE => reverse, [Exactly(1)];
    CONTAINS => contains, [Exactly(2), Exactly(3)];
    LIKE => like, [Exactly(3)];
    LTRIM => ltrim, [Exactly(1), Exactly(2)];
    RTRIM => rtrim, [Exactly(1), Exactly(2)];
    FIND_FIRST => find_first, [Exactly(2), Exactly(3), Exactly(4)];
    FIND_LAST => find_last, [Exactly(2), Exactly(3), Exactly(4)];
    SPLIT => split, [Exactly(1), Exactly(2), Exactly(3)];
    SUBSTITUTE => substitute, [Exactly(2), Exactly(3), Exactly(4)];
    MD5 => md5, [Exactly(1)];
    SHA1 => sha1, [Exactly(1)];
    RANDOM_TOKEN => random_token, [Exactly(1)];
    // Numeric functions
    FLOOR => floor, [Exactly(1)];
    CEIL => ceil, [Exactly(1)];
    ROUND => round, [Exactly(1)];
    ABS => abs, [Exactly(1)];
    SQRT => sqrt, [Exactly(1)];
    RAND => rand, [Exactly(0)];
    // Date functions
    DATE_TIMESTAMP => date_timestamp, [Exactly(1), Between(3, 7)];
    DATE_ISO8601 => date_iso8601, [Exactly(1), Between(3, 7)];
    DATE_DAYOFWEEK => date_dayofweek, [Exactly(1)];
    DATE_YEAR => date_year, [Exactly(1)];
    DATE_MONTH => date_month, [Exactly(1)];
    DATE_DAY => date_day, [Exactly(1)];
    DATE_HOUR => date_hour, [Exactly(1)];
    DATE_MINUTE => date_minute, [Exactly(1)];
    DATE_SECOND => date_second, [Exactly(1)];
    DATE_MILLISECOND => date_millisecond, [Exactly(1)];
    DATE_NOW => date_now, [Exactly(0)];
    // List functions
    FLATTEN => flatten, [Exactly(1), Exactly(2)];
    MIN => min, [Exactly(1)];
    MAX => max, [Exactly(1)];
    AVERAGE => average, [Exactly(1)];
    SUM => sum, [Exactly(1)];
    MEDIAN => median, [Exactly(1)];
    PERCENTILE => percentile, [Exactly(2), Exactly(3)];
    VARIANCE_POPULATION => variance_population, [Exactly(1)];
    VARIANCE_SAMPLE => variance_sample, [Exactly(1)];
    STDDEV_POPULATION => stddev_population, [Exactly(1)];
    STDDEV_SAMPLE => stddev_sample, [Exactly(1)];
    FIRST => first, [Exactly(1)];
    LAST => last, [Exactly(1)];
    NTH => nth, [Exactly(2)];
    POSITION => position, [Exactly(2), Exactly(3)];
    SLICE => slice, [Exactly(2), Exactly(3)];
    UNIQUE => unique, [Exactly(1)];
    UNION => union, [AtLeast(1)];
    UNION_DISTINCT => union_distinct, [AtLeast(1)];
    MINUS => minus, [AtLeast(1)];
    INTERSECTION => intersection, [AtLeast(1)];
    CALL => call, [AtLeast(1)];
    APPLY => apply, [AtLeast(1)];
    PUSH => push, [Exactly(2), Exactly(3)];
    APPEND => append, [Exactly(2), Exactly(3)];
    POP => pop, [Exactly(1)];
    SHIFT => shift, [Exactly(1)];
    UNSHIFT => unshift, [Exactly(2), Exactly(3)];
    REMOVE_VALUE => remove_value, [Exactly(2), Exactly(3)];
    REMOVE_VALUES => remove_values, [Exactly(2)];
    REMOVE_NTH => remove_nth, [Exactly(2)];
    // Document functions
    MATCHES => matches, [Exactly(2), Exactly(3)];
    MERGE => merge, [AtLeast(1)];
    MERGE_RECURSIVE => merge_recursive, [AtLeast(1)];
    TRANSLATE => translate, [Exactly(2), Exactly(3)];
    HAS => has, [Exactly(2)];
    ATTRIBUTES => attributes, [Between(1, 3)];
    UNSET => unset, [AtLeast(1)];
    KEEP => keep, [AtLeast(2)];
    PARSE_IDENTIFIER => parse_identifier, [Exactly(1)];
    ZIP => zip, [Exactly(2)];
    // Geo functions
    NEAR => near, [Exactly(5), Exactly(6)];
    WITHIN => within, [Exactly(5), Exactly(6)];
    WITHIN_RECTANGLE => within_rectangle, [Exactly(5)];
    IS_IN_POLYGON => is_in_polygon, [Exactly(2), Exactly(3)];
    // Fulltext functions
    FULLTEXT => fulltext, [Exactly(3)];
    // Graph functions
    PATHS => paths, [Exactly(3), Exactly(4)];
    TRAVERSAL => traversal, [Exactly(5), Exactly(6)];
    TRAVERSAL_TREE => traversal_tree, [Exactly(5), Exactly(6)];
    SHORTEST_PATH => shortest_path, [Exactly(5), Exactly(6)];
    EDGES => edges, [Exactly(3), Exactly(4)];
    NEIGHBORS => neighbors, [Exactly(4), Exactly(5)];
    GRAPH_PATHS => graph_paths, [Exactly(1), Exactly(2)];
    GRAPH_SHORTEST_PATH => graph_shortest_path, [Exactly(3), Exactly(4)];
    GRAPH_DISTANCE_TO => graph_distance_to, [Exactly(3), Exactly(4)];
    GRAPH_TRAVERSAL => graph_traversal, [Exactly(3), Exactly(4)];
    GRAPH_TRAVERSAL_TREE => graph_traversal_tree, [Exactly(4), Exactly(5)];
    GRAPH_EDGES => graph_edges, [Exactly(2), Exactly(3)];
    GRAPH_VERTICES => graph_vertices, [Exactly(2), Exactly(3)];
    GRAPH_NEIGHBORS => graph_neighbors, [Exactly(2), Exactly(3)];
    GRAPH_COMMON_NEIGHBORS => graph_common_neighbors, [Exactly(3), Exactly(4), Exactly(5)];
    GRAPH_COMMON_PROPERTIES => graph_common_properties, [Exactly(3), Exactly(4)];
    GRAPH_ECCENTRICITY => graph_eccentricity, [Exactly(1), Exactly(2)];
    GRAPH_BETWEENNESS => graph_betweenness, [Exactly(1), Exactly(2)];
    GRAPH_CLOSENESS => graph_closeness, [Exactly(1), Exactly(2)];
    GRAPH_ABSOLUTE_ECCENTRICITY => graph_absolute_eccentricity, [Exactly(2), Exactly(3)];
    GRAPH_ABSOLUTE_BETWEENNESS => graph_absolute_betweenness, [Exactly(2), Exactly(3)];
    GRAPH_ABSOLUTE_CLOSENESS => graph_absolute_closeness, [Exactly(2), Exactly(3)];
    GRAPH_DIAMETER => graph_diameter, [Exactly(1), Exactly(2)];
    GRAPH_RADIUS => graph_radius, [Exactly(1), Exactly(2)];
    // Control flow functions
    NOT_NULL => not_null, [AtLeast(1)];
    FIRST_LIST => first_list, [AtLeast(1)];
    FIRST_DOCUMENT => first_document, [AtLeast(1)];
    // Miscellaneous functions
    COLLECTIONS => collections, [Exactly(0)];
    CURRENT_USER => current_user, [Exactly(0)];
    DOCUMENT => document, [Exactly(1), Exactly(2)];
    SKIPLIST => skiplist, [Between(2, 4)], deprecated: true;
}
