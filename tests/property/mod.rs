// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module

mod debounce_properties;
