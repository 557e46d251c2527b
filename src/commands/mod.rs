// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod capture;
pub mod categories;
pub mod goals;
pub mod insights;
pub mod jobs;
pub mod notifications;
pub mod pending;
pub mod reports;
pub mod snapshots;
pub mod subscriptions;
pub mod transactions;
