use crate::error::CoreError;
use crate::rpc::{call_as, NetworkInfo, Transport};

pub async fn get_network_info<T: Transport + ?Sized>(rpc: &T) -> Result<NetworkInfo, CoreError> {
    call_as(rpc, "getnetworkinfo", Vec::new()).await
}
