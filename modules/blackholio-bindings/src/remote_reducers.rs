//! Aggregate facade over every Blackholio reducer.

use std::sync::Arc;

use blackholio_dispatch::{
    ArgsDecoder, ArgsHandler, ContextHandler, DispatchConfig, DispatchError, DispatchLoop,
    DispatchRouter, HandlerId, JsonArgsDecoder, ReducerEventContext, ReducerSlot,
};
use tracing::debug;

use crate::reducers::{ConnectArgs, DebugArgs, DisconnectArgs, InitArgs, SpawnFoodArgs};

/// The only reducer surface application code touches.
///
/// `on_<reducer>` subscribes and returns the registration's id,
/// `remove_<reducer>` drops one registration of that handler,
/// `remove_<reducer>_id` drops the registration an id names, and
/// `invoke_<reducer>` is what the router calls.
/// Cloning shares the same handler lists.
#[derive(Clone, Default)]
pub struct RemoteReducers {
    connect: Arc<ReducerSlot<ConnectArgs>>,
    disconnect: Arc<ReducerSlot<DisconnectArgs>>,
    init: Arc<ReducerSlot<InitArgs>>,
    debug: Arc<ReducerSlot<DebugArgs>>,
    spawn_food: Arc<ReducerSlot<SpawnFoodArgs>>,
}

impl RemoteReducers {
    pub fn new() -> Self {
        Self::default()
    }

    // connect

    pub fn on_connect(&self, handler: Arc<ContextHandler>) -> HandlerId {
        self.connect.on(handler)
    }

    pub fn remove_connect(&self, handler: &Arc<ContextHandler>) -> bool {
        self.connect.remove(handler)
    }

    pub fn remove_connect_id(&self, id: HandlerId) -> bool {
        self.connect.remove_id(id)
    }

    pub fn invoke_connect(&self, ctx: &ReducerEventContext, args: &ConnectArgs) -> bool {
        self.connect.invoke(ctx, args)
    }

    // disconnect

    pub fn on_disconnect(&self, handler: Arc<ContextHandler>) -> HandlerId {
        self.disconnect.on(handler)
    }

    pub fn remove_disconnect(&self, handler: &Arc<ContextHandler>) -> bool {
        self.disconnect.remove(handler)
    }

    pub fn remove_disconnect_id(&self, id: HandlerId) -> bool {
        self.disconnect.remove_id(id)
    }

    pub fn invoke_disconnect(&self, ctx: &ReducerEventContext, args: &DisconnectArgs) -> bool {
        self.disconnect.invoke(ctx, args)
    }

    // init

    pub fn on_init(&self, handler: Arc<ContextHandler>) -> HandlerId {
        self.init.on(handler)
    }

    pub fn remove_init(&self, handler: &Arc<ContextHandler>) -> bool {
        self.init.remove(handler)
    }

    pub fn remove_init_id(&self, id: HandlerId) -> bool {
        self.init.remove_id(id)
    }

    pub fn invoke_init(&self, ctx: &ReducerEventContext, args: &InitArgs) -> bool {
        self.init.invoke(ctx, args)
    }

    // debug

    pub fn on_debug(&self, handler: Arc<ContextHandler>) -> HandlerId {
        self.debug.on(handler)
    }

    pub fn remove_debug(&self, handler: &Arc<ContextHandler>) -> bool {
        self.debug.remove(handler)
    }

    pub fn remove_debug_id(&self, id: HandlerId) -> bool {
        self.debug.remove_id(id)
    }

    pub fn invoke_debug(&self, ctx: &ReducerEventContext, args: &DebugArgs) -> bool {
        self.debug.invoke(ctx, args)
    }

    // spawn_food

    pub fn on_spawn_food(&self, handler: Arc<ArgsHandler<SpawnFoodArgs>>) -> HandlerId {
        self.spawn_food.on(handler)
    }

    pub fn remove_spawn_food(&self, handler: &Arc<ArgsHandler<SpawnFoodArgs>>) -> bool {
        self.spawn_food.remove(handler)
    }

    pub fn remove_spawn_food_id(&self, id: HandlerId) -> bool {
        self.spawn_food.remove_id(id)
    }

    pub fn invoke_spawn_food(&self, ctx: &ReducerEventContext, args: &SpawnFoodArgs) -> bool {
        self.spawn_food.invoke(ctx, args)
    }

    /// A router bound to every reducer of the module, decoding JSON arguments.
    pub fn router(&self, config: &DispatchConfig) -> Result<DispatchRouter, DispatchError> {
        self.router_with(JsonArgsDecoder, config)
    }

    /// A router bound to every reducer of the module with a custom decoder.
    pub fn router_with<D: ArgsDecoder>(
        &self,
        decoder: D,
        config: &DispatchConfig,
    ) -> Result<DispatchRouter<D>, DispatchError> {
        let mut router = DispatchRouter::new(decoder).with_config(config);
        router.register(Arc::clone(&self.connect))?;
        router.register(Arc::clone(&self.disconnect))?;
        router.register(Arc::clone(&self.init))?;
        router.register(Arc::clone(&self.debug))?;
        router.register(Arc::clone(&self.spawn_food))?;
        debug!(reducers = router.definitions().len(), "Bound reducer routes");
        Ok(router)
    }

    /// Router plus the loop that drives it for one connection.
    pub fn dispatch_loop(&self, config: &DispatchConfig) -> Result<DispatchLoop, DispatchError> {
        config.log();
        Ok(DispatchLoop::new(Arc::new(self.router(config)?)))
    }
}
