/// Read-through caching over Redis.
///
/// Checks the cache for `$key`; on a hit the cached value is returned, on a
/// miss `$block` computes the value, which is queued for a background cache
/// write and returned.
///
/// # Arguments
/// * `$cache`: a [`crate::db::Cache`]
/// * `$key`: the [`crate::db::CacheKey`] to read and write
/// * `$ttl`: time-to-live for the cached value in seconds
/// * `$block`: async block computing the value on a miss
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $ttl:expr, $block:expr) => {{
        if let Some(cached) = $cache.get_from_cache(&$key).await? {
            Ok(cached)
        } else {
            let value = $block.await?;
            $cache.set_in_background(&$key, &value, $ttl);
            Ok(value)
        }
    }};
}
